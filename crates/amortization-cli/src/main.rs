mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::debug;
use std::process;

use commands::amortization::LoanArgs;
use logging::LogLevel;

/// Loan amortization schedules with extra and balloon payments
#[derive(Parser)]
#[command(
    name = "amort",
    version,
    about = "Loan amortization schedules with extra and balloon payments",
    long_about = "Computes a month-by-month amortization schedule for a fixed-rate loan \
                  with decimal precision. Supports recurring extra monthly and yearly \
                  payments and a one-time balloon payment."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log verbosity (RUST_LOG refines it per module)
    #[arg(long, default_value = "warn", global = true)]
    log_level: LogLevel,
}

#[derive(Subcommand)]
enum Commands {
    /// Full month-by-month amortization schedule
    Schedule(LoanArgs),
    /// Totals, principal/interest split, and prepayment savings
    Summary(LoanArgs),
    /// Balance, interest and principal series for charting
    Trend(LoanArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logger(&cli.log_level);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::amortization::run_schedule(args),
        Commands::Summary(args) => commands::amortization::run_summary(args),
        Commands::Trend(args) => commands::amortization::run_trend(args),
        Commands::Version => {
            println!("amort {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            debug!("rendering output as {:?}", cli.output);
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
