use chrono::NaiveDate;
use clap::Args;
use log::info;
use rust_decimal::Decimal;
use serde_json::Value;

use amortization_core::amortization::schedule::{self, LoanParameters};
use amortization_core::amortization::summary;

use crate::input;

/// Loan terms, given as flags or as a JSON document
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 7.5)
    #[arg(long)]
    pub annual_rate: Option<Decimal>,

    /// Loan tenure in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Extra principal paid every month
    #[arg(long, default_value_t = Decimal::ZERO)]
    pub extra_monthly: Decimal,

    /// Extra principal paid every twelfth month
    #[arg(long, default_value_t = Decimal::ZERO)]
    pub extra_yearly: Decimal,

    /// Year at whose end the balloon is paid (0 = none)
    #[arg(long, default_value_t = 0)]
    pub balloon_year: u32,

    /// One-time balloon payment amount
    #[arg(long, default_value_t = Decimal::ZERO)]
    pub balloon_amount: Decimal,

    /// Date of the first payment (YYYY-MM-DD)
    #[arg(long)]
    pub first_payment_date: Option<NaiveDate>,
}

impl LoanArgs {
    fn into_parameters(self) -> Result<LoanParameters, Box<dyn std::error::Error>> {
        let piped = if self.input.is_none() {
            input::stdin::read_stdin()?
        } else {
            None
        };
        self.resolve(piped)
    }

    /// Pick the parameter source: `--input` file, then piped JSON, then flags.
    fn resolve(self, piped: Option<Value>) -> Result<LoanParameters, Box<dyn std::error::Error>> {
        if let Some(ref path) = self.input {
            info!("reading loan parameters from {path}");
            return input::file::read_json(path);
        }
        if let Some(data) = piped {
            info!("reading loan parameters from stdin");
            return Ok(serde_json::from_value(data)?);
        }
        self.parameters_from_flags()
    }

    fn parameters_from_flags(&self) -> Result<LoanParameters, Box<dyn std::error::Error>> {
        let principal = self
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let annual_rate = self
            .annual_rate
            .ok_or("--annual-rate is required (or provide --input)")?;
        let years = self.years.ok_or("--years is required (or provide --input)")?;

        Ok(LoanParameters {
            principal,
            annual_rate_percent: annual_rate,
            years,
            extra_monthly: self.extra_monthly,
            extra_yearly: self.extra_yearly,
            balloon_year: self.balloon_year,
            balloon_amount: self.balloon_amount,
            first_payment_date: self.first_payment_date,
        })
    }
}

pub fn run_schedule(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.into_parameters()?;
    let result = schedule::compute_amortization(&params)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_summary(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.into_parameters()?;
    let result = summary::summarize_amortization(&params)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_trend(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.into_parameters()?;
    let result = schedule::compute_amortization(&params)?;
    let trend = summary::trend_series(&result.result);
    Ok(serde_json::to_value(trend)?)
}
