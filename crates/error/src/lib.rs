//! # Campus Error Infrastructure
//!
//! Error taxonomy and API response handling shared by every Campus crate.
//!
//! Core operations never panic across the store boundary: they return
//! [`Result`] and the HTTP layer maps each [`AppError`] variant to a status
//! code, a stable machine-readable code and a human message.

pub mod middleware;
pub mod rejection;
pub mod response;
pub mod traits;

pub use middleware::ErrorHandler;
pub use response::ApiResponse;
pub use traits::ResultExt;

/// Convenience type alias for Result with AppError.
pub type Result<T, E = AppError> = std::result::Result<T, E>;

/// Main application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A referenced entity is absent or inactive.
    #[error("NotFound: {message}")]
    NotFound {
        message: String,
    },

    #[error("BadRequest: {message}")]
    BadRequest {
        message: String,
    },

    #[error("Unauthorized: {message}")]
    Unauthorized {
        message: String,
    },

    #[error("JwtExpired: Token has expired")]
    JwtExpired,

    #[error("JwtInvalidSignature: Invalid token signature")]
    JwtInvalidSignature,

    #[error("JwtInvalidToken: Invalid token")]
    JwtInvalidToken,

    #[error("Forbidden: {message}")]
    Forbidden {
        message: String,
    },

    /// Uniqueness or state-exclusivity violation. `details` carries whatever
    /// the caller needs to act on the conflict (e.g. the current teacher id).
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Operation not permitted given the current relational state.
    #[error("InvalidState: {message}")]
    InvalidState {
        message: String,
    },

    #[error("Validation: {message}")]
    Validation {
        message: String,
    },

    #[error("Internal: {message}")]
    Internal {
        message: String,
    },

    #[error("Database: {message}")]
    Database {
        message: String,
    },

    #[error("IO: {message}")]
    Io {
        message: String,
    },

    #[error("Config: {message}")]
    Config {
        message: String,
    },

    #[error("Migration: {message}")]
    Migration {
        message: String,
    },
}

impl AppError {
    /// Create a not found error.
    #[inline]
    pub fn not_found(message: impl ToString) -> Self {
        Self::NotFound {
            message: message.to_string(),
        }
    }

    /// Create a bad request error.
    #[inline]
    pub fn bad_request(message: impl ToString) -> Self {
        Self::BadRequest {
            message: message.to_string(),
        }
    }

    /// Create an unauthorized error.
    #[inline]
    pub fn unauthorized(message: impl ToString) -> Self {
        Self::Unauthorized {
            message: message.to_string(),
        }
    }

    /// Create a forbidden error.
    #[inline]
    pub fn forbidden(message: impl ToString) -> Self {
        Self::Forbidden {
            message: message.to_string(),
        }
    }

    /// Create a conflict error without details.
    #[inline]
    pub fn conflict(message: impl ToString) -> Self {
        Self::Conflict {
            message: message.to_string(),
            details: None,
        }
    }

    /// Create a conflict error carrying a structured payload.
    #[inline]
    pub fn conflict_with(message: impl ToString, details: serde_json::Value) -> Self {
        Self::Conflict {
            message: message.to_string(),
            details: Some(details),
        }
    }

    /// Create an invalid state error.
    #[inline]
    pub fn invalid_state(message: impl ToString) -> Self {
        Self::InvalidState {
            message: message.to_string(),
        }
    }

    /// Create a validation error.
    #[inline]
    pub fn validation(message: impl ToString) -> Self {
        Self::Validation {
            message: message.to_string(),
        }
    }

    /// Create an internal error.
    #[inline]
    pub fn internal(message: impl ToString) -> Self {
        Self::Internal {
            message: message.to_string(),
        }
    }

    /// Create a database error.
    #[inline]
    pub fn database(message: impl ToString) -> Self {
        Self::Database {
            message: message.to_string(),
        }
    }

    /// Create a config error.
    #[inline]
    pub fn config(message: impl ToString) -> Self {
        Self::Config {
            message: message.to_string(),
        }
    }

    /// Create a migration error.
    #[inline]
    pub fn migration(message: impl ToString) -> Self {
        Self::Migration {
            message: message.to_string(),
        }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> http::StatusCode {
        match self {
            AppError::NotFound {
                ..
            } => http::StatusCode::NOT_FOUND,
            AppError::BadRequest {
                ..
            }
            | AppError::InvalidState {
                ..
            }
            | AppError::Validation {
                ..
            } => http::StatusCode::BAD_REQUEST,
            AppError::Unauthorized {
                ..
            }
            | AppError::JwtExpired
            | AppError::JwtInvalidSignature
            | AppError::JwtInvalidToken => http::StatusCode::UNAUTHORIZED,
            AppError::Forbidden {
                ..
            } => http::StatusCode::FORBIDDEN,
            AppError::Conflict {
                ..
            } => http::StatusCode::CONFLICT,
            AppError::Internal {
                ..
            }
            | AppError::Database {
                ..
            }
            | AppError::Io {
                ..
            }
            | AppError::Config {
                ..
            }
            | AppError::Migration {
                ..
            } => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound {
                ..
            } => "NOT_FOUND",
            AppError::BadRequest {
                ..
            } => "BAD_REQUEST",
            AppError::Unauthorized {
                ..
            } => "UNAUTHORIZED",
            AppError::JwtExpired => "JWT_EXPIRED",
            AppError::JwtInvalidSignature => "JWT_INVALID_SIGNATURE",
            AppError::JwtInvalidToken => "JWT_INVALID_TOKEN",
            AppError::Forbidden {
                ..
            } => "FORBIDDEN",
            AppError::Conflict {
                ..
            } => "CONFLICT",
            AppError::InvalidState {
                ..
            } => "INVALID_STATE",
            AppError::Validation {
                ..
            } => "VALIDATION_ERROR",
            AppError::Internal {
                ..
            } => "INTERNAL_ERROR",
            AppError::Database {
                ..
            } => "DATABASE_ERROR",
            AppError::Io {
                ..
            } => "IO_ERROR",
            AppError::Config {
                ..
            } => "CONFIG_ERROR",
            AppError::Migration {
                ..
            } => "MIGRATION_ERROR",
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::JwtExpired => "Token has expired".to_string(),
            AppError::JwtInvalidSignature => "Invalid token signature".to_string(),
            AppError::JwtInvalidToken => "Invalid token".to_string(),
            AppError::NotFound {
                message,
            }
            | AppError::BadRequest {
                message,
            }
            | AppError::Unauthorized {
                message,
            }
            | AppError::Forbidden {
                message,
            }
            | AppError::Conflict {
                message,
                ..
            }
            | AppError::InvalidState {
                message,
            }
            | AppError::Validation {
                message,
            }
            | AppError::Internal {
                message,
            }
            | AppError::Database {
                message,
            }
            | AppError::Io {
                message,
            }
            | AppError::Config {
                message,
            }
            | AppError::Migration {
                message,
            } => message.clone(),
        }
    }

    /// Structured payload attached to the error, if any.
    pub fn details(&self) -> Option<&serde_json::Value> {
        match self {
            AppError::Conflict {
                details,
                ..
            } => details.as_ref(),
            _ => None,
        }
    }

    /// Whether this error represents a store or server failure rather than a
    /// caller mistake.
    pub fn is_server_error(&self) -> bool { self.status().is_server_error() }

    /// Add context to the error by prefixing its message.
    #[inline]
    pub fn context(self, context: impl ToString) -> Self {
        let prefix = context.to_string();
        let prefixed = |message: String| format!("{}: {}", prefix, message);
        match self {
            AppError::NotFound {
                message,
            } => {
                Self::NotFound {
                    message: prefixed(message),
                }
            },
            AppError::BadRequest {
                message,
            } => {
                Self::BadRequest {
                    message: prefixed(message),
                }
            },
            AppError::Unauthorized {
                message,
            } => {
                Self::Unauthorized {
                    message: prefixed(message),
                }
            },
            AppError::Forbidden {
                message,
            } => {
                Self::Forbidden {
                    message: prefixed(message),
                }
            },
            AppError::Conflict {
                message,
                details,
            } => {
                Self::Conflict {
                    message: prefixed(message),
                    details,
                }
            },
            AppError::InvalidState {
                message,
            } => {
                Self::InvalidState {
                    message: prefixed(message),
                }
            },
            AppError::Validation {
                message,
            } => {
                Self::Validation {
                    message: prefixed(message),
                }
            },
            AppError::Internal {
                message,
            } => {
                Self::Internal {
                    message: prefixed(message),
                }
            },
            AppError::Database {
                message,
            } => {
                Self::Database {
                    message: prefixed(message),
                }
            },
            AppError::Io {
                message,
            } => {
                Self::Io {
                    message: prefixed(message),
                }
            },
            AppError::Config {
                message,
            } => {
                Self::Config {
                    message: prefixed(message),
                }
            },
            AppError::Migration {
                message,
            } => {
                Self::Migration {
                    message: prefixed(message),
                }
            },
            AppError::JwtExpired | AppError::JwtInvalidSignature | AppError::JwtInvalidToken => self,
        }
    }
}

/// Convert anyhow errors to AppError.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}

/// Convert std::io errors to AppError.
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

/// Convert String to AppError.
impl From<String> for AppError {
    fn from(s: String) -> Self {
        Self::BadRequest {
            message: s,
        }
    }
}

/// Convert &str to AppError.
impl From<&str> for AppError {
    fn from(s: &str) -> Self { Self::from(s.to_string()) }
}

/// Convert Sea-ORM database errors to AppError.
///
/// Unique-constraint violations surface as `Conflict`; the store is the last
/// line of defence for every uniqueness invariant and its verdict is never
/// retried.
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        if let Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
            tracing::debug!(detail = %detail, "Unique constraint violated");
            return Self::conflict("Resource already exists");
        }
        if let Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(detail)) = err.sql_err() {
            tracing::debug!(detail = %detail, "Foreign key constraint violated");
            return Self::conflict("Resource is still referenced");
        }
        Self::Database {
            message: err.to_string(),
        }
    }
}

/// Convert validator validation errors to AppError.
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
            })
            .collect();
        messages.sort();

        let message = if messages.is_empty() {
            "Validation failed".to_string()
        }
        else {
            messages.join(", ")
        };

        Self::Validation {
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_error_not_found() {
        let err = AppError::not_found("School not found");
        assert_eq!(err.status(), http::StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "NOT_FOUND");
        assert!(err.to_string().contains("NotFound"));
    }

    #[test]
    fn test_error_conflict_carries_details() {
        let err = AppError::conflict_with("Already assigned", json!({ "currentTeacherId": 7 }));
        assert_eq!(err.status(), http::StatusCode::CONFLICT);
        assert_eq!(err.code(), "CONFLICT");
        assert_eq!(err.details(), Some(&json!({ "currentTeacherId": 7 })));
    }

    #[test]
    fn test_error_conflict_without_details() {
        let err = AppError::conflict("Duplicate entry");
        assert!(err.details().is_none());
    }

    #[test]
    fn test_error_invalid_state() {
        let err = AppError::invalid_state("Subject is not assigned to this class");
        assert_eq!(err.status(), http::StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "INVALID_STATE");
    }

    #[test]
    fn test_error_validation_is_bad_request() {
        let err = AppError::validation("Invalid format");
        assert_eq!(err.status(), http::StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_server_errors() {
        assert!(AppError::database("down").is_server_error());
        assert!(AppError::internal("boom").is_server_error());
        assert!(!AppError::forbidden("no").is_server_error());
    }

    #[test]
    fn test_jwt_errors_are_unauthorized() {
        assert_eq!(AppError::JwtExpired.status(), http::StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::JwtInvalidToken.message(), "Invalid token");
    }

    #[test]
    fn test_context_prefixes_message() {
        let err = AppError::not_found("Section not found").context("Assignment 2");
        assert_eq!(err.message(), "Assignment 2: Section not found");
    }

    #[test]
    fn test_context_keeps_conflict_details() {
        let err = AppError::conflict_with("taken", json!({ "currentTeacherId": 1 })).context("Assignment 1");
        assert_eq!(err.message(), "Assignment 1: taken");
        assert!(err.details().is_some());
    }

    #[test]
    fn test_context_leaves_jwt_errors_alone() {
        let err = AppError::JwtExpired.context("ignored");
        assert!(matches!(err, AppError::JwtExpired));
    }

    #[test]
    fn test_from_anyhow() {
        let err: AppError = anyhow::anyhow!("Test error").into();
        assert_eq!(err.code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: AppError = io_err.into();
        assert_eq!(err.code(), "IO_ERROR");
    }

    #[test]
    fn test_from_str() {
        let err: AppError = "Bad request".into();
        assert_eq!(err.code(), "BAD_REQUEST");
    }

    #[test]
    fn test_from_db_err() {
        let err: AppError = sea_orm::DbErr::Custom("connection reset".to_string()).into();
        assert_eq!(err.code(), "DATABASE_ERROR");
    }

    #[test]
    fn test_from_validation_errors() {
        use validator::Validate;

        #[derive(Validate)]
        struct Capacity {
            #[validate(range(min = 1, max = 500, message = "Capacity must be between 1 and 500"))]
            value: i32,
        }

        let errors = Capacity {
            value: 0,
        }
        .validate()
        .unwrap_err();
        let err: AppError = errors.into();

        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(err.message(), "Capacity must be between 1 and 500");
    }
}
