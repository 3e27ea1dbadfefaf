//! # Health Handler

use axum::Json;

use crate::{dto::queries::HealthResponse, AppState};

/// Liveness probe with process uptime. Public.
pub async fn health_handler(state: &AppState) -> Json<HealthResponse> {
    Json(HealthResponse {
        status:         "ok",
        version:        env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}
