//! # Logging Configuration Tests
//!
//! Tests for structured logging setup and configuration.

#[cfg(test)]
mod logging_config_tests {
    use logging::LoggingConfig;

    #[test]
    fn test_logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, "compact");
        assert_eq!(config.environment, "development");
        assert!(config.log_file.is_none());
        assert!(!config.is_production());
    }

    #[test]
    fn test_file_output_builds_with_guard() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            log_file: Some(dir.path().join("campus.log").to_string_lossy().into_owned()),
            ..Default::default()
        };
        let (_subscriber, _guard) = config.build().unwrap();
    }

    #[test]
    fn test_config_deserializes_kebab_case() {
        let config: LoggingConfig =
            serde_json::from_str(r#"{ "level": "warn", "include-timestamp": false }"#).unwrap();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, "compact");
        assert!(!config.include_timestamp);
    }
}

#[cfg(test)]
mod macro_tests {
    #[test]
    fn test_measure_duration_returns_block_value() {
        let value = logging::measure_duration!("test", "arithmetic", { 40 + 2 });
        assert_eq!(value, 42);
    }

    #[test]
    fn test_log_api_request_compiles_with_request_id() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let request_id = logging::RequestId::new();
        logging::log_api_request!("POST", "/api/v1/schools/create", 201, 3, request_id);
        logging::log_api_request!("GET", "/api/v1/schools/DPS001/classes", 500, 7, request_id);
    }

    #[test]
    fn test_measure_duration_reports_slow_blocks() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let value = logging::measure_duration!("test", "sleep", {
            std::thread::sleep(std::time::Duration::from_millis(
                logging::macros::SLOW_OPERATION_MS as u64 + 10,
            ));
            "done"
        });
        assert_eq!(value, "done");
    }
}
