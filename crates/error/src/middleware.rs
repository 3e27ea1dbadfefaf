//! # Error Handling Middleware
//!
//! Converts [`AppError`] values into HTTP responses carrying the standard
//! envelope.
//!
//! ## Usage
//!
//! ```rust
//! use error::{AppError, ErrorHandler};
//!
//! let handler = ErrorHandler::new(false);
//! let response = handler.to_response(&AppError::not_found("Section not found"));
//! assert_eq!(response.status(), http::StatusCode::NOT_FOUND);
//! ```

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};

use crate::{response::ApiResponse, AppError};

/// Error handler that converts errors to HTTP responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorHandler {
    /// Whether to expose the message of server-side failures. Client errors
    /// always carry their message.
    pub include_details: bool,
}

impl ErrorHandler {
    /// Create a new error handler.
    #[inline]
    pub fn new(include_details: bool) -> Self {
        Self {
            include_details,
        }
    }

    /// Build the envelope for an error.
    pub fn to_envelope(&self, err: &AppError) -> ApiResponse<serde_json::Value> {
        let mut envelope = if err.is_server_error() {
            let envelope = ApiResponse::failure(err.code(), "Internal server error");
            if self.include_details {
                envelope.with_error(err.message())
            }
            else {
                envelope
            }
        }
        else {
            ApiResponse::failure(err.code(), err.message())
        };

        if let Some(details) = err.details() {
            envelope = envelope.with_data(details.clone());
        }
        envelope
    }

    /// Convert an error to a response.
    pub fn to_response(&self, err: &AppError) -> Response {
        if err.is_server_error() {
            tracing::error!(code = err.code(), error = %err, "Request failed");
        }
        else {
            tracing::debug!(code = err.code(), error = %err, "Request rejected");
        }

        let mut response = (err.status(), Json(self.to_envelope(err))).into_response();
        if err.status() == http::StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let include_details = std::env::var("CAMPUS_ERROR_DETAILS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        ErrorHandler::new(include_details).to_response(&self)
    }
}
