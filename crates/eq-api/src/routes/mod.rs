//! Content store routes.

pub mod health;
pub mod programs;
pub mod services;

use crate::state::AppState;
use axum::Router;

/// Creates the content store router, mounted under `/api`.
pub fn create_router(state: AppState) -> Router {
    Router::new().nest("/api", api_routes()).with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(programs::routes())
        .merge(services::routes())
        .merge(health::routes())
}
