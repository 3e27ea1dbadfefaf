//! # API Response Types
//!
//! The envelope wrapped around every Campus API response.
//!
//! ## Response Format
//!
//! ```json
//! { "success": true, "data": { ... }, "message": "Session created successfully" }
//! { "success": false, "code": "CONFLICT", "message": "...", "data": { "currentTeacherId": 4 } }
//! ```

use serde::{Deserialize, Serialize};

/// API response envelope.
///
/// # Example
///
/// ```rust
/// use error::ApiResponse;
///
/// let response = ApiResponse::success(vec!["Class 1", "Class 2"]).with_message("Classes loaded");
/// let json = serde_json::to_value(&response).unwrap();
/// assert_eq!(json["success"], true);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded.
    pub success: bool,

    /// Machine-readable error code, only present on failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Human-readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Underlying error description, only present on failures when details
    /// are exposed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Response payload, or the structured details of a failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response carrying `data`.
    #[inline]
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code:    None,
            message: None,
            error:   None,
            data:    Some(data),
        }
    }

    /// Create a successful response that only carries a message.
    #[inline]
    pub fn acknowledged(message: impl ToString) -> Self {
        Self {
            success: true,
            code:    None,
            message: Some(message.to_string()),
            error:   None,
            data:    None,
        }
    }

    /// Create a failed response.
    #[inline]
    pub fn failure(code: impl ToString, message: impl ToString) -> Self {
        Self {
            success: false,
            code:    Some(code.to_string()),
            message: Some(message.to_string()),
            error:   None,
            data:    None,
        }
    }

    /// Attach a human-readable message.
    #[inline]
    pub fn with_message(mut self, message: impl ToString) -> Self {
        self.message = Some(message.to_string());
        self
    }

    /// Attach an underlying error description.
    #[inline]
    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.error = Some(error.to_string());
        self
    }

    /// Attach or replace the payload.
    #[inline]
    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }
}
