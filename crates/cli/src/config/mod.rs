//! # Runtime Configuration
//!
//! Gathers every environment-driven setting the server needs so that
//! `campus serve` and `campus validate` read them the same way.

use std::net::SocketAddr;

use academics::AcademicsConfig;
use auth::JwtConfig;
use error::Result;
use migration::DatabaseConfig;

/// Database, token and engine settings read from `CAMPUS_*` variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database:  DatabaseConfig,
    pub jwt:       JwtConfig,
    pub academics: AcademicsConfig,
}

impl AppConfig {
    /// Load and parse every setting.
    ///
    /// # Errors
    ///
    /// Returns the first config error met: an unparsable database value, a
    /// missing or non-base64 JWT secret, or an invalid engine flag.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database:  DatabaseConfig::from_env()?,
            jwt:       JwtConfig::from_env()?,
            academics: AcademicsConfig::from_env()?,
        })
    }
}

/// Parses a host and port into a SocketAddr.
///
/// IPv6 hosts are bracketed before the port is appended, so `::1` becomes
/// `[::1]:3000`.
pub fn parse_socket_addr(host: &str, port: u16) -> Result<SocketAddr, std::net::AddrParseError> {
    let addr_str = if host.contains(':') && !host.starts_with('[') {
        format!("[{}]:{}", host, port)
    }
    else {
        format!("{}:{}", host, port)
    };
    addr_str.parse()
}
