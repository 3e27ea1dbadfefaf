//! # Logging Configuration
//!
//! Configuration for the logging subsystem.
//! Supports environment variables and programmatic configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt as _, EnvFilter, Layer, Registry};

use crate::LoggingError;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Logging configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct LoggingConfig {
    /// Log level or filter directive
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format (json, pretty, compact)
    #[serde(default = "default_format")]
    pub format: String,

    /// Optional log file path, rotated daily
    #[serde(default)]
    pub log_file: Option<String>,

    /// Whether to include timestamps
    #[serde(default = "default::bool_true")]
    pub include_timestamp: bool,

    /// Environment (development, testing, production)
    #[serde(default = "default_environment")]
    pub environment: String,
}

mod default {
    pub fn bool_true() -> bool { true }
}

fn default_level() -> String { "info".to_string() }

fn default_format() -> String { "compact".to_string() }

fn default_environment() -> String { "development".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level:             default_level(),
            format:            default_format(),
            log_file:          None,
            include_timestamp: true,
            environment:       default_environment(),
        }
    }
}

/// Keeps the non-blocking file writer flushing until dropped.
#[derive(Debug, Default)]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

impl LoggingConfig {
    /// Create configuration from environment variables, falling back to the
    /// given values.
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `RUST_LOG` | `level` |
    /// | `CAMPUS_LOG_FORMAT` | `format` |
    /// | `CAMPUS_LOG_FILE` | `log_file` |
    /// | `CAMPUS_LOG_TIMESTAMPS` | `include_timestamp` |
    /// | `CAMPUS_ENV` | `environment` |
    pub fn from_env(level: &str, format: &str, log_file: Option<&str>) -> Self {
        Self {
            level:             std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string()),
            format:            std::env::var("CAMPUS_LOG_FORMAT").unwrap_or_else(|_| format.to_string()),
            log_file:          std::env::var("CAMPUS_LOG_FILE")
                .ok()
                .or_else(|| log_file.map(str::to_string)),
            include_timestamp: std::env::var("CAMPUS_LOG_TIMESTAMPS")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            environment:       std::env::var("CAMPUS_ENV").unwrap_or_else(|_| default_environment()),
        }
    }

    /// Whether this configuration targets production.
    pub fn is_production(&self) -> bool { self.environment.eq_ignore_ascii_case("production") }

    /// Parse the level into a filter.
    pub fn filter(&self) -> Result<EnvFilter, LoggingError> {
        EnvFilter::try_new(&self.level).map_err(|e| {
            LoggingError::InvalidFilter {
                filter:  self.level.clone(),
                message: e.to_string(),
            }
        })
    }

    /// Build the tracing subscriber from this configuration.
    pub fn build(&self) -> Result<(Box<dyn tracing::Subscriber + Send + Sync>, LoggingGuard), LoggingError> {
        let mut layers: Vec<BoxedLayer> = vec![self.stdout_layer()];
        let mut guard = LoggingGuard::default();

        if let Some(ref log_file) = self.log_file {
            let path = Path::new(log_file);
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "campus.log".to_string());

            let appender = tracing_appender::rolling::daily(directory, file_name);
            let (writer, worker) = tracing_appender::non_blocking(appender);
            layers.push(
                fmt::layer()
                    .json()
                    .with_timer(fmt::time::UtcTime::rfc_3339())
                    .with_writer(writer)
                    .boxed(),
            );
            guard._file = Some(worker);
        }

        let subscriber = Registry::default().with(layers).with(self.filter()?);
        Ok((Box::new(subscriber), guard))
    }

    fn stdout_layer(&self) -> BoxedLayer {
        let timer = fmt::time::UtcTime::rfc_3339();
        match (self.format.as_str(), self.include_timestamp) {
            ("json", true) => fmt::layer().json().with_timer(timer).boxed(),
            ("json", false) => fmt::layer().json().without_time().boxed(),
            ("pretty", true) => fmt::layer().pretty().with_timer(timer).boxed(),
            ("pretty", false) => fmt::layer().pretty().without_time().boxed(),
            (_, true) => fmt::layer().compact().with_timer(timer).boxed(),
            (_, false) => fmt::layer().compact().without_time().boxed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn test_config_from_arguments() {
        let config = LoggingConfig::from_env("info", "json", None);
        assert_eq!(config.level, "info");
        assert_eq!(config.format, "json");
        assert_eq!(config.environment, "development");
        assert!(config.include_timestamp);
    }

    #[test]
    #[serial]
    fn test_config_from_env() {
        // Safe in test context - serialised with the other env tests
        unsafe {
            std::env::set_var("RUST_LOG", "debug");
            std::env::set_var("CAMPUS_LOG_FORMAT", "pretty");
            std::env::set_var("CAMPUS_ENV", "production");
        }

        let config = LoggingConfig::from_env("info", "json", None);
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, "pretty");
        assert!(config.is_production());

        unsafe {
            std::env::remove_var("RUST_LOG");
            std::env::remove_var("CAMPUS_LOG_FORMAT");
            std::env::remove_var("CAMPUS_ENV");
        }
    }

    #[test]
    fn test_build_each_format() {
        for format in ["json", "pretty", "compact", "unknown"] {
            let config = LoggingConfig {
                format: format.to_string(),
                ..Default::default()
            };
            assert!(config.build().is_ok(), "format {} should build", format);
        }
    }

    #[test]
    fn test_filter_directives() {
        let config = LoggingConfig {
            level: "server=debug,sqlx=warn".to_string(),
            ..Default::default()
        };
        assert!(config.filter().is_ok());
    }

    #[test]
    fn test_invalid_filter() {
        let config = LoggingConfig {
            level: "server=notalevel".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.filter(),
            Err(LoggingError::InvalidFilter { .. })
        ));
    }
}
