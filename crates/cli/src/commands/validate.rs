//! # CLI Validate Command
//!
//! Configuration validation for the Campus CLI.

use error::{AppError, Result};
use tracing::info;

use crate::config::AppConfig;

/// Variables that have no usable default.
const REQUIRED_VARS: [&str; 1] = ["CAMPUS_JWT_SECRET"];

/// Validates the CLI configuration
///
/// Fails when a required variable is missing or any `CAMPUS_*` value does
/// not parse. No connection is opened.
pub fn validate() -> Result<AppConfig> {
    let missing: Vec<&str> = REQUIRED_VARS
        .iter()
        .copied()
        .filter(|var| {
            std::env::var(var)
                .map(|v| v.trim().is_empty())
                .unwrap_or(true)
        })
        .collect();

    if !missing.is_empty() {
        return Err(AppError::validation(format!(
            "Missing required environment variables: {}",
            missing.join(", ")
        )));
    }

    let config = AppConfig::from_env()?;
    info!(
        target: "validate",
        database_host = %config.database.host,
        database_url_set = config.database.url.is_some(),
        issuer = %config.jwt.issuer,
        default_section_capacity = config.academics.default_section_capacity,
        "Configuration is valid"
    );
    Ok(config)
}
