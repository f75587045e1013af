//! Mock content source for testing.
//!
//! Serves entities from an in-memory catalog without any network. Supports
//! failure injection, latency simulation, and records every call so tests
//! can assert on how the source was used.

use crate::traits::{ContentSource, SourceError, SourceResult};
use async_trait::async_trait;
use chrono::Utc;
use eq_core::{Catalog, CollectionKind, Entity, HealthStatus};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Behavior configuration for failure injection.
#[derive(Debug, Clone, Default)]
pub enum MockBehavior {
    /// Serve from the catalog.
    #[default]
    Normal,
    /// Always fail with the given error.
    AlwaysFail(SourceError),
    /// Fail with the given error for specific slugs only.
    FailOn {
        slugs: Vec<String>,
        error: SourceError,
    },
    /// Answer with an entity of the wrong collection for single lookups.
    WrongVariant,
}

/// Record of a call for test verification.
#[derive(Debug, Clone)]
pub struct FetchRecord {
    pub kind: CollectionKind,
    /// `None` for collection fetches.
    pub slug: Option<String>,
    pub timestamp: chrono::DateTime<Utc>,
}

/// Mock content source for testing.
pub struct MockContentSource {
    name: String,
    catalog: Arc<RwLock<Catalog>>,
    behavior: Arc<RwLock<MockBehavior>>,
    latency: Arc<RwLock<Option<Duration>>>,
    slug_latency: Arc<RwLock<HashMap<String, Duration>>>,
    call_count: AtomicU64,
    history: Arc<RwLock<Vec<FetchRecord>>>,
}

impl MockContentSource {
    /// Creates a mock serving the bundled catalog.
    pub fn new(name: &str) -> Self {
        Self::with_catalog(name, Catalog::bundled().clone())
    }

    /// Creates a mock serving the given catalog.
    pub fn with_catalog(name: &str, catalog: Catalog) -> Self {
        Self {
            name: name.to_string(),
            catalog: Arc::new(RwLock::new(catalog)),
            behavior: Arc::new(RwLock::new(MockBehavior::Normal)),
            latency: Arc::new(RwLock::new(None)),
            slug_latency: Arc::new(RwLock::new(HashMap::new())),
            call_count: AtomicU64::new(0),
            history: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// A source whose every call fails as if the store were unreachable.
    pub fn unreachable(name: &str) -> Self {
        let mut source = Self::new(name);
        source.behavior = Arc::new(RwLock::new(MockBehavior::AlwaysFail(
            SourceError::ConnectionFailed("connection refused".to_string()),
        )));
        source
    }

    pub async fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.write().await = behavior;
    }

    pub async fn set_catalog(&self, catalog: Catalog) {
        *self.catalog.write().await = catalog;
    }

    /// Delays every call.
    pub async fn set_latency(&self, latency: Duration) {
        *self.latency.write().await = Some(latency);
    }

    /// Delays single lookups of one slug.
    pub async fn set_slug_latency(&self, slug: &str, latency: Duration) {
        self.slug_latency
            .write()
            .await
            .insert(slug.to_string(), latency);
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }

    pub async fn history(&self) -> Vec<FetchRecord> {
        self.history.read().await.clone()
    }

    async fn record(&self, kind: CollectionKind, slug: Option<&str>) {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.history.write().await.push(FetchRecord {
            kind,
            slug: slug.map(str::to_string),
            timestamp: Utc::now(),
        });
    }

    async fn simulate_latency(&self, slug: Option<&str>) {
        let per_slug = match slug {
            Some(slug) => self.slug_latency.read().await.get(slug).copied(),
            None => None,
        };
        let delay = per_slug.or(*self.latency.read().await);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    async fn injected_failure(&self, slug: Option<&str>) -> Option<SourceError> {
        match &*self.behavior.read().await {
            MockBehavior::AlwaysFail(error) => Some(error.clone()),
            MockBehavior::FailOn { slugs, error } => slug
                .filter(|s| slugs.iter().any(|f| f == s))
                .map(|_| error.clone()),
            MockBehavior::Normal | MockBehavior::WrongVariant => None,
        }
    }
}

#[async_trait]
impl ContentSource for MockContentSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_one(&self, kind: CollectionKind, slug: &str) -> SourceResult<Entity> {
        self.record(kind, Some(slug)).await;
        self.simulate_latency(Some(slug)).await;

        if let Some(error) = self.injected_failure(Some(slug)).await {
            return Err(error);
        }

        let catalog = self.catalog.read().await;
        if matches!(*self.behavior.read().await, MockBehavior::WrongVariant) {
            let other = match kind {
                CollectionKind::Program => CollectionKind::Service,
                CollectionKind::Service => CollectionKind::Program,
            };
            return catalog
                .list(other)
                .into_iter()
                .next()
                .ok_or_else(|| SourceError::NotFound(slug.to_string()));
        }

        catalog
            .find(kind, slug)
            .ok_or_else(|| SourceError::NotFound(slug.to_string()))
    }

    async fn fetch_all(&self, kind: CollectionKind) -> SourceResult<Vec<Entity>> {
        self.record(kind, None).await;
        self.simulate_latency(None).await;

        if let Some(error) = self.injected_failure(None).await {
            return Err(error);
        }

        Ok(self.catalog.read().await.list(kind))
    }

    async fn health_check(&self) -> SourceResult<HealthStatus> {
        if let Some(error) = self.injected_failure(None).await {
            return Err(error);
        }
        Ok(HealthStatus::ok("Mock content store online"))
    }
}
