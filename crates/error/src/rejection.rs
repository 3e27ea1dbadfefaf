//! # Rejection Handlers
//!
//! Converts axum extractor rejections into the standard error envelope.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    response::{IntoResponse, Response},
};

use crate::AppError;

/// Turn a JSON body rejection into a `BAD_REQUEST` envelope.
///
/// Messages like "missing field `sessionId` at line 1 column 2" are shortened
/// to "Missing required field: sessionId".
pub fn handle_json_rejection(rejection: JsonRejection) -> Response {
    json_rejection_error(&rejection.body_text()).into_response()
}

/// Turn a query string rejection into a `BAD_REQUEST` envelope.
pub fn handle_query_rejection(rejection: QueryRejection) -> Response {
    AppError::bad_request(format!(
        "Query string deserialization error: {}",
        rejection.body_text()
    ))
    .into_response()
}

/// Turn a path parameter rejection into a `BAD_REQUEST` envelope.
pub fn handle_path_rejection(rejection: PathRejection) -> Response {
    AppError::bad_request(format!("Invalid path parameter: {}", rejection.body_text())).into_response()
}

fn json_rejection_error(error_message: &str) -> AppError {
    let marker = "missing field `";
    let message = match error_message.find(marker) {
        Some(start) => {
            let rest = &error_message[start + marker.len() ..];
            match rest.find('`') {
                Some(end) => format!("Missing required field: {}", &rest[.. end]),
                None => error_message.to_string(),
            }
        },
        None => error_message.to_string(),
    };
    AppError::bad_request(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_is_shortened() {
        let err = json_rejection_error(
            "Failed to deserialize the JSON body into the target type: missing field `sessionId` at line 1 column 2",
        );
        assert_eq!(err.message(), "Missing required field: sessionId");
        assert_eq!(err.code(), "BAD_REQUEST");
    }

    #[test]
    fn test_other_messages_pass_through() {
        let err = json_rejection_error("Expected request with `Content-Type: application/json`");
        assert_eq!(
            err.message(),
            "Expected request with `Content-Type: application/json`"
        );
    }
}
