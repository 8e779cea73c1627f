//! Logging service

use crate::models::LogLevel;
use tracing_subscriber::EnvFilter;

/// Filter directive for the flaggate crates at `level`
pub fn filter_directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "flaggate=error,flaggate_core=error",
        LogLevel::Warn => "flaggate=warn,flaggate_core=warn",
        LogLevel::Info => "flaggate=info,flaggate_core=info",
        LogLevel::Debug => "flaggate=debug,flaggate_core=debug",
        LogLevel::Trace => "flaggate=trace,flaggate_core=trace",
    }
}

/// Initialize logging with the specified level.
///
/// Output goes to stderr; stdout carries evaluation results. `RUST_LOG`
/// overrides the level when set.
pub fn init_logging(level: LogLevel) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()?;

    Ok(())
}
