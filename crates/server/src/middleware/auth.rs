//! # Authentication Middleware
//!
//! Turns the bearer token of a protected request into a [`Principal`].
//!
//! A request passes when its token validates and the account it names is
//! still present and active in the identity directory. Token problems are
//! answered with 401 and a `WWW-Authenticate: Bearer` challenge; a valid
//! token for a deactivated account is answered with 403.

use auth::{extract_bearer_token, validate_token, Principal};
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use error::AppError;
use serde_json::json;
use tracing::{debug, error, warn};

use crate::AppState;

const DEACTIVATED: &str = "Account is deactivated. Please contact an administrator.";

/// Why a request could not be authenticated.
enum Rejection {
    /// 401 with the given message.
    Challenge(&'static str),
    /// Any other error, rendered through the normal envelope.
    Error(AppError),
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        match self {
            Rejection::Challenge(message) => challenge(message),
            Rejection::Error(err) => err.into_response(),
        }
    }
}

pub async fn auth_middleware(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    match authenticate(&state, request.headers()).await {
        Ok(principal) => {
            debug!(user_id = principal.id, role = ?principal.role, "Authenticated request");
            request.extensions_mut().insert::<Principal>(principal);
            next.run(request).await
        },
        Err(rejection) => rejection.into_response(),
    }
}

async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Principal, Rejection> {
    let token = bearer_token(headers)?;

    let claims = validate_token(&state.jwt_config, &token).map_err(|e| {
        match e {
            AppError::JwtExpired => Rejection::Challenge("Token has expired"),
            AppError::JwtInvalidSignature => Rejection::Challenge("Invalid token signature"),
            AppError::JwtInvalidToken => Rejection::Challenge("Invalid token"),
            other => {
                error!(error = %other, "Token validation failed");
                Rejection::Error(other)
            },
        }
    })?;
    let principal = claims
        .principal()
        .map_err(|_| Rejection::Challenge("Invalid token"))?;

    match state.directory.find_user(principal.id).await {
        Ok(Some(user)) if user.is_active => Ok(principal),
        Ok(_) => {
            warn!(user_id = principal.id, "Rejected token of a missing or deactivated user");
            Err(Rejection::Error(AppError::forbidden(DEACTIVATED)))
        },
        Err(e) => {
            error!(error = %e, "Failed to look up authenticated user");
            Err(Rejection::Error(e))
        },
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<String, Rejection> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(Rejection::Challenge("Missing authorization header"))?
        .to_str()
        .map_err(|_| Rejection::Challenge("Invalid authorization header encoding"))?;
    extract_bearer_token(value).ok_or(Rejection::Challenge("Invalid authorization header format"))
}

fn challenge(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Bearer")],
        axum::Json(json!({
            "success": false,
            "code": "AUTHENTICATION_ERROR",
            "message": message
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[tokio::test]
    async fn test_challenge_response_shape() {
        let response = challenge("Missing authorization header");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert!(matches!(
            bearer_token(&headers),
            Err(Rejection::Challenge("Missing authorization header"))
        ));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(matches!(
            bearer_token(&headers),
            Err(Rejection::Challenge("Invalid authorization header format"))
        ));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers).ok().as_deref(), Some("abc.def"));
    }
}
