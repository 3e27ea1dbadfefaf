//! # Error Crate Tests
//!
//! Status mapping and envelope rendering of the error taxonomy.

#[cfg(test)]
mod status_mapping_tests {
    use error::AppError;
    use http::StatusCode;

    #[test]
    fn test_taxonomy_status_codes() {
        let cases = [
            (AppError::not_found("x"), StatusCode::NOT_FOUND),
            (AppError::conflict("x"), StatusCode::CONFLICT),
            (AppError::invalid_state("x"), StatusCode::BAD_REQUEST),
            (AppError::validation("x"), StatusCode::BAD_REQUEST),
            (AppError::bad_request("x"), StatusCode::BAD_REQUEST),
            (AppError::forbidden("x"), StatusCode::FORBIDDEN),
            (AppError::unauthorized("x"), StatusCode::UNAUTHORIZED),
            (AppError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::database("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::config("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::migration("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.status(), status, "unexpected status for {}", err.code());
        }
    }

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(AppError::invalid_state("x").code(), "INVALID_STATE");
        assert_eq!(AppError::conflict("x").code(), "CONFLICT");
        assert_eq!(AppError::forbidden("x").code(), "FORBIDDEN");
    }
}

#[cfg(test)]
mod envelope_tests {
    use axum::{body::to_bytes, response::IntoResponse};
    use error::AppError;
    use serde_json::{json, Value};

    async fn body_json(err: AppError) -> (http::StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_conflict_response_body() {
        let (status, body) = body_json(AppError::conflict_with(
            "Teacher already assigned to this section-subject",
            json!({ "currentTeacherId": 12 }),
        ))
        .await;

        assert_eq!(status, http::StatusCode::CONFLICT);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "CONFLICT");
        assert_eq!(body["data"]["currentTeacherId"], 12);
    }

    #[tokio::test]
    async fn test_not_found_response_body() {
        let (status, body) = body_json(AppError::not_found("School not found")).await;

        assert_eq!(status, http::StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "School not found");
        assert!(body.get("data").is_none());
    }
}
