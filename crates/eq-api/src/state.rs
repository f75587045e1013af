//! Application state shared across handlers.

use eq_core::Catalog;
use eq_hydration::{ContentSource, HydrationClient};
use std::sync::Arc;
use tracing::info;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Records served by the content store endpoints.
    pub store: Arc<Catalog>,
    /// Client the site pages hydrate through.
    pub hydration: HydrationClient,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(store: Catalog, hydration: HydrationClient) -> Self {
        info!(
            programs = store.programs().len(),
            services = store.services().len(),
            content_source = hydration.source().name(),
            "Content store initialized"
        );

        Self {
            store: Arc::new(store),
            hydration,
        }
    }

    /// Serves the bundled catalog and hydrates pages from `source`.
    pub fn bundled(source: Arc<dyn ContentSource>) -> Self {
        Self::new(Catalog::bundled().clone(), HydrationClient::new(source))
    }
}
