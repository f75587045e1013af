//! # eq-api
//!
//! HTTP surface of the Equilibrar site.
//!
//! Serves the content store JSON API under `/api` and the server-rendered
//! pages (home, service detail, program detail) on every other path.

pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
pub mod web;

pub use error::ApiError;
pub use server::{ApiDoc, ApiServer, ApiServerConfig, DEFAULT_PORT};
pub use state::AppState;
