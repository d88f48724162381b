use clap::ValueEnum;
use env_logger::Builder;
use log::LevelFilter;
use std::sync::Once;

#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<&LogLevel> for LevelFilter {
    fn from(level: &LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Initialise env_logger once. Logs go to stderr so piped JSON/CSV on
/// stdout stays clean.
pub fn init_logger(level: &LogLevel) {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let mut builder = Builder::new();
        builder.filter_level(level.into());
        if let Ok(spec) = std::env::var("RUST_LOG") {
            builder.parse_filters(&spec);
        }
        builder.format_timestamp(None).try_init().ok();
    });
}
