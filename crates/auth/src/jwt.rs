//! # JWT Token Validation
//!
//! Validation of the bearer tokens issued by the identity system.

use academics::{Id, Role};
use base64::Engine;
use error::AppError;
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::{roles::Principal, Result};

/// Token verification settings
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Base64-encoded HMAC secret
    pub secret:   String,
    /// Expected `iss` claim
    pub issuer:   String,
    /// Expected `aud` claim
    pub audience: String,
}

impl JwtConfig {
    /// Load the configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `CAMPUS_JWT_SECRET` (required, base64)
    /// - `CAMPUS_JWT_ISSUER` (default: "campus")
    /// - `CAMPUS_JWT_AUDIENCE` (default: "campus-api")
    ///
    /// # Errors
    ///
    /// Returns a config error when the secret is missing or not valid base64.
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("CAMPUS_JWT_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| AppError::config("CAMPUS_JWT_SECRET is not set"))?;
        base64::engine::general_purpose::STANDARD
            .decode(secret.trim())
            .map_err(|e| AppError::config(format!("CAMPUS_JWT_SECRET is not valid base64: {}", e)))?;

        Ok(Self {
            secret:   secret.trim().to_string(),
            issuer:   std::env::var("CAMPUS_JWT_ISSUER").unwrap_or_else(|_| "campus".to_string()),
            audience: std::env::var("CAMPUS_JWT_AUDIENCE").unwrap_or_else(|_| "campus-api".to_string()),
        })
    }
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Subject (user ID)
    pub sub:       String,
    /// The user's single role
    pub role:      Role,
    /// School the user belongs to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_id: Option<Id>,
    /// Token issuer
    pub iss:       String,
    /// Token audience
    pub aud:       String,
    /// Expiration time (Unix timestamp)
    pub exp:       u64,
    /// Issued at (Unix timestamp)
    pub iat:       u64,
}

impl Claims {
    /// The caller identified by these claims.
    pub fn principal(&self) -> Result<Principal> {
        let id = self.sub.parse::<Id>().map_err(|_| AppError::JwtInvalidToken)?;
        Ok(Principal {
            id,
            role: self.role,
            school_id: self.school_id,
        })
    }
}

/// Validates a JWT token and returns the claims
///
/// # Errors
///
/// `JwtExpired`, `JwtInvalidSignature` or `JwtInvalidToken` depending on why
/// the token was rejected; a config error if the secret cannot be decoded.
pub fn validate_token(config: &JwtConfig, token: &str) -> Result<Claims> {
    let decoding_key = DecodingKey::from_base64_secret(&config.secret)
        .map_err(|e| AppError::config(format!("Invalid JWT secret: {}", e)))?;

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.audience]);
    validation.validate_exp = true;

    let data = jsonwebtoken::decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
        match e.kind() {
            ErrorKind::ExpiredSignature => AppError::JwtExpired,
            ErrorKind::InvalidSignature => AppError::JwtInvalidSignature,
            _ => AppError::JwtInvalidToken,
        }
    })?;

    Ok(data.claims)
}

/// Extracts the Bearer token from the Authorization header
///
/// # Returns
///
/// The token string if present, or None if missing/invalid.
pub fn extract_bearer_token(auth_header: &str) -> Option<String> {
    let token = auth_header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        return None;
    }

    Some(token.to_string())
}
