//! Service collection endpoints.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
#[allow(unused_imports)] // referenced by name in #[utoipa::path] responses
use eq_core::models::{ServiceEnvelope, ServiceListEnvelope};
use eq_core::{ApiResponse, CollectionKind, Service};

use crate::error::ApiError;
use crate::state::AppState;

/// Creates service routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/services", get(list_services))
        .route("/services/:slug", get(get_service))
}

#[utoipa::path(
    get,
    path = "/api/services",
    responses(
        (status = 200, description = "All services", body = ServiceListEnvelope)
    ),
    tag = "Services"
)]
pub async fn list_services(State(state): State<AppState>) -> Json<ApiResponse<Vec<Service>>> {
    Json(ApiResponse::ok(state.store.services().to_vec()))
}

#[utoipa::path(
    get,
    path = "/api/services/{slug}",
    params(
        ("slug" = String, Path, description = "Service slug")
    ),
    responses(
        (status = 200, description = "Service found", body = ServiceEnvelope),
        (status = 404, description = "No service with this slug", body = ServiceEnvelope)
    ),
    tag = "Services"
)]
pub async fn get_service(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<Service>>, ApiError> {
    state
        .store
        .service(&slug)
        .map(|service| Json(ApiResponse::ok(service.clone())))
        .ok_or_else(|| ApiError::not_found(CollectionKind::Service, &slug))
}
