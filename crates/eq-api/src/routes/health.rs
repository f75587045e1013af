//! Health check endpoint.

use axum::{routing::get, Json, Router};
use eq_core::HealthStatus;

use crate::state::AppState;

/// Message reported while the store is serving.
pub const HEALTH_MESSAGE: &str = "C.O.R.E. Nervous System Online";

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Liveness of the content store.
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Content store is online", body = HealthStatus)
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus::ok(HEALTH_MESSAGE))
}
