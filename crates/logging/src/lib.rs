//! # Campus Logging Infrastructure
//!
//! Structured logging for every Campus binary and test harness.
//! Provides tracing integration with JSON, pretty and compact output and
//! environment-based configuration.

pub mod config;
pub mod macros;
pub mod request_id;

pub use config::{LoggingConfig, LoggingGuard};
pub use request_id::RequestId;
// Re-export tracing macros
pub use tracing::{debug, error, info, trace, warn};

/// Errors raised while installing the global subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("a global subscriber is already installed: {0}")]
    AlreadyInitialized(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("invalid log filter '{filter}': {message}")]
    InvalidFilter {
        filter:  String,
        message: String,
    },
}

/// Initialize the logging system.
///
/// Environment variables override the arguments (see [`LoggingConfig::from_env`]).
/// The returned guard must be kept alive for as long as file output is wanted.
///
/// # Arguments
///
/// * `level` - Log level or filter directive (e.g. `info`, `server=debug,sqlx=warn`)
/// * `format` - Output format (json, pretty, compact)
/// * `log_file` - Optional path to log file
pub fn init(level: &str, format: &str, log_file: Option<&str>) -> Result<LoggingGuard, LoggingError> {
    init_with_config(LoggingConfig::from_env(level, format, log_file))
}

/// Initialize logging with a custom configuration.
pub fn init_with_config(config: LoggingConfig) -> Result<LoggingGuard, LoggingError> {
    let (subscriber, guard) = config.build()?;
    tracing::subscriber::set_global_default(subscriber)?;
    info!(
        level = %config.level,
        format = %config.format,
        environment = %config.environment,
        log_file = ?config.log_file,
        "Logging initialized"
    );
    Ok(guard)
}
