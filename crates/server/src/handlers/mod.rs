//! # Request Handlers
//!
//! Each handler takes the shared [`crate::AppState`], the caller's
//! [`auth::Principal`] when the route is protected, and the already
//! extracted request data. Role gates are injected by
//! `#[require_role(...)]`; everything else is delegated to the engines.

use axum::{http::StatusCode, Json};
use error::ApiResponse;

pub mod assignments;
pub mod enrollments;
pub mod health;
pub mod schools;
pub mod structure;
pub mod subjects;

/// `200 OK` envelope.
pub type Reply<T> = Json<ApiResponse<T>>;

/// `201 Created` envelope.
pub type Created<T> = (StatusCode, Json<ApiResponse<T>>);

pub(crate) fn ok<T>(data: T) -> Reply<T> { Json(ApiResponse::success(data)) }

pub(crate) fn ok_with<T>(data: T, message: &str) -> Reply<T> { Json(ApiResponse::success(data).with_message(message)) }

pub(crate) fn created<T>(data: T, message: &str) -> Created<T> {
    (
        StatusCode::CREATED,
        Json(ApiResponse::success(data).with_message(message)),
    )
}

pub(crate) fn acknowledged(message: &str) -> Reply<()> { Json(ApiResponse::acknowledged(message)) }
