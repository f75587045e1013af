//! Program collection endpoints.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
#[allow(unused_imports)] // referenced by name in #[utoipa::path] responses
use eq_core::models::{ProgramEnvelope, ProgramListEnvelope};
use eq_core::{ApiResponse, CollectionKind, Program};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Creates program routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/programs", get(list_programs))
        .route("/programs/:slug", get(get_program))
}

/// Lists every program.
#[utoipa::path(
    get,
    path = "/api/programs",
    responses(
        (status = 200, description = "All programs", body = ProgramListEnvelope)
    ),
    tag = "Programs"
)]
pub async fn list_programs(State(state): State<AppState>) -> Json<ApiResponse<Vec<Program>>> {
    Json(ApiResponse::ok(state.store.programs().to_vec()))
}

/// Gets one program by slug.
#[utoipa::path(
    get,
    path = "/api/programs/{slug}",
    params(
        ("slug" = String, Path, description = "Program slug")
    ),
    responses(
        (status = 200, description = "Program found", body = ProgramEnvelope),
        (status = 404, description = "No program with this slug", body = ProgramEnvelope)
    ),
    tag = "Programs"
)]
pub async fn get_program(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<Program>>, ApiError> {
    match state.store.program(&slug) {
        Some(program) => Ok(Json(ApiResponse::ok(program.clone()))),
        None => {
            debug!(slug = %slug, "Program not in store");
            Err(ApiError::not_found(CollectionKind::Program, &slug))
        }
    }
}
