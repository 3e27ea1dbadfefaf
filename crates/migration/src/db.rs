//! # Database Connection Management
//!
//! Connection settings for the PostgreSQL database and a helper that opens a
//! pooled Sea-ORM connection from them.

use std::{str::FromStr, time::Duration};

use ::error::{AppError, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

/// Database connection configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database host address
    pub host:            String,
    /// Database port number
    pub port:            u16,
    /// Database name
    pub database:        String,
    /// Database username
    pub username:        String,
    /// Database password
    pub password:        String,
    /// SSL mode for connection
    pub ssl_mode:        SslMode,
    /// Maximum connections in pool
    pub pool_size:       u32,
    /// Connection timeout in seconds
    pub connect_timeout: u64,
    /// Full connection URL; takes precedence over the individual fields
    pub url:             Option<String>,
}

/// SSL mode options for PostgreSQL connections
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SslMode {
    /// No SSL - only use for development
    Disable,
    /// Prefer SSL if available
    #[default]
    Prefer,
    /// Require SSL connection
    Require,
    /// Verify SSL certificate
    VerifyCa,
    /// Verify full SSL certificate chain
    VerifyFull,
}

impl SslMode {
    /// Converts the SSL mode to a PostgreSQL connection string value
    pub fn as_str(&self) -> &'static str {
        match self {
            SslMode::Disable => "disable",
            SslMode::Prefer => "prefer",
            SslMode::Require => "require",
            SslMode::VerifyCa => "verify-ca",
            SslMode::VerifyFull => "verify-full",
        }
    }
}

impl FromStr for SslMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disable" => Ok(SslMode::Disable),
            "prefer" => Ok(SslMode::Prefer),
            "require" => Ok(SslMode::Require),
            "verify-ca" => Ok(SslMode::VerifyCa),
            "verify-full" => Ok(SslMode::VerifyFull),
            other => Err(AppError::config(format!("Unknown SSL mode: {}", other))),
        }
    }
}

impl DatabaseConfig {
    /// Creates a new configuration with local development defaults
    #[must_use]
    pub fn new() -> Self {
        Self {
            host:            "localhost".to_string(),
            port:            5432,
            database:        "campus".to_string(),
            username:        "campus".to_string(),
            password:        String::new(),
            ssl_mode:        SslMode::Prefer,
            pool_size:       10,
            connect_timeout: 30,
            url:             None,
        }
    }

    #[must_use]
    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_database(mut self, database: &str) -> Self {
        self.database = database.to_string();
        self
    }

    #[must_use]
    pub fn with_username(mut self, username: &str) -> Self {
        self.username = username.to_string();
        self
    }

    #[must_use]
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = password.to_string();
        self
    }

    #[must_use]
    pub fn with_ssl_mode(mut self, ssl_mode: SslMode) -> Self {
        self.ssl_mode = ssl_mode;
        self
    }

    #[must_use]
    pub fn with_pool_size(mut self, size: u32) -> Self {
        self.pool_size = size;
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    /// Loads the configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `CAMPUS_DATABASE_URL` (optional, overrides everything below)
    /// - `CAMPUS_DATABASE_HOST` (default: "localhost")
    /// - `CAMPUS_DATABASE_PORT` (default: "5432")
    /// - `CAMPUS_DATABASE_NAME` (default: "campus")
    /// - `CAMPUS_DATABASE_USER` (default: "campus")
    /// - `CAMPUS_DATABASE_PASSWORD` (default: "")
    /// - `CAMPUS_DATABASE_SSL_MODE` (default: "prefer")
    /// - `CAMPUS_DATABASE_POOL_SIZE` (default: "10")
    ///
    /// # Errors
    ///
    /// Returns a config error when a numeric value or the SSL mode does not
    /// parse.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::new();
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        let mut config = Self {
            host:            var("CAMPUS_DATABASE_HOST").unwrap_or(defaults.host),
            port:            parse_var("CAMPUS_DATABASE_PORT", defaults.port)?,
            database:        var("CAMPUS_DATABASE_NAME").unwrap_or(defaults.database),
            username:        var("CAMPUS_DATABASE_USER").unwrap_or(defaults.username),
            password:        std::env::var("CAMPUS_DATABASE_PASSWORD").unwrap_or(defaults.password),
            ssl_mode:        var("CAMPUS_DATABASE_SSL_MODE")
                .map(|v| v.parse())
                .transpose()?
                .unwrap_or(defaults.ssl_mode),
            pool_size:       parse_var("CAMPUS_DATABASE_POOL_SIZE", defaults.pool_size)?,
            connect_timeout: defaults.connect_timeout,
            url:             None,
        };
        config.url = var("CAMPUS_DATABASE_URL");
        Ok(config)
    }

    /// Builds the PostgreSQL connection string, percent-encoding credentials
    #[must_use]
    pub fn build_connection_string(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            encode_component(&self.username),
            encode_component(&self.password),
            self.host,
            self.port,
            encode_component(&self.database),
            self.ssl_mode.as_str()
        )
    }

    /// Opens a pooled connection
    ///
    /// # Errors
    ///
    /// Returns a database error if the connection fails.
    pub async fn connect(&self) -> Result<DatabaseConnection> {
        let mut options = ConnectOptions::new(self.build_connection_string());
        options
            .max_connections(self.pool_size)
            .connect_timeout(Duration::from_secs(self.connect_timeout))
            .sqlx_logging(false);

        let db = Database::connect(options).await?;
        info!(host = %self.host, database = %self.database, "Database connection established");
        Ok(db)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self { Self::new() }
}

fn parse_var<T: FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse()
                .map_err(|_| AppError::config(format!("{} must be a number, got '{}'", key, raw)))
        },
        _ => Ok(default),
    }
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn encode_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A' ..= b'Z' | b'a' ..= b'z' | b'0' ..= b'9' | b'-' | b'.' | b'_' | b'~' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
