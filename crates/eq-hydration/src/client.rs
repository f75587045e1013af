//! Hydration client.
//!
//! Resolves entities against the content store and recovers from store
//! failures with the local fallback. The store's word is final when it
//! answers 404: the fallback is only consulted when the store could not
//! give a usable answer at all.

use crate::fallback::BundledFallback;
use crate::traits::{ContentSource, FallbackLookup, SourceError};
use eq_core::{CollectionKind, ContentEntity, Entity, Program, Service};
use std::sync::Arc;
use tracing::{debug, warn};

/// Content store client with fallback recovery.
#[derive(Clone)]
pub struct HydrationClient {
    source: Arc<dyn ContentSource>,
    fallback: Arc<dyn FallbackLookup>,
}

impl HydrationClient {
    /// Creates a client that falls back to the bundled catalog.
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self::with_fallback(source, Arc::new(BundledFallback))
    }

    pub fn with_fallback(source: Arc<dyn ContentSource>, fallback: Arc<dyn FallbackLookup>) -> Self {
        Self { source, fallback }
    }

    pub fn source(&self) -> &Arc<dyn ContentSource> {
        &self.source
    }

    /// Resolves one entity. `None` means the entity does not exist, either
    /// because the store said so or because neither the store nor the
    /// fallback could produce it.
    pub async fn resolve(&self, kind: CollectionKind, slug: &str) -> Option<Entity> {
        if slug.is_empty() {
            warn!(kind = %kind, "Resolve called without a slug");
            return None;
        }

        let error = match self.source.fetch_one(kind, slug).await {
            Ok(entity) if entity.kind() == kind && entity.slug() == slug => {
                debug!(kind = %kind, slug = %slug, outcome = "remote", "Resolved entity");
                return Some(entity);
            }
            Ok(entity) => SourceError::InvalidResponse(format!(
                "expected {} '{}', store returned {} '{}'",
                kind,
                slug,
                entity.kind(),
                entity.slug()
            )),
            Err(e) if e.is_definitive_absence() => {
                debug!(kind = %kind, slug = %slug, outcome = "not_found", "Entity does not exist");
                return None;
            }
            Err(e) => e,
        };

        let found = self.fallback.find(kind, slug);
        let outcome = if found.is_some() {
            "fallback_hit"
        } else {
            "fallback_miss"
        };
        warn!(
            kind = %kind,
            slug = %slug,
            source = self.source.name(),
            error_kind = error.kind(),
            error = %error,
            outcome,
            "Content store unavailable, using fallback"
        );
        found
    }

    /// Resolves a whole collection. Any store failure yields the complete
    /// fallback collection.
    pub async fn resolve_all(&self, kind: CollectionKind) -> Vec<Entity> {
        let error = match self.source.fetch_all(kind).await {
            Ok(entities) => match entities.iter().find(|e| e.kind() != kind) {
                None => {
                    debug!(kind = %kind, count = entities.len(), outcome = "remote", "Resolved collection");
                    return entities;
                }
                Some(stray) => SourceError::InvalidResponse(format!(
                    "{} collection contained {} '{}'",
                    kind,
                    stray.kind(),
                    stray.slug()
                )),
            },
            Err(e) => e,
        };

        let entities = self.fallback.list(kind);
        warn!(
            kind = %kind,
            source = self.source.name(),
            error_kind = error.kind(),
            error = %error,
            count = entities.len(),
            outcome = "fallback_hit",
            "Content store unavailable, using fallback collection"
        );
        entities
    }

    /// Typed single lookup.
    pub async fn get<T: ContentEntity>(&self, slug: &str) -> Option<T> {
        self.resolve(T::KIND, slug).await.and_then(T::from_entity)
    }

    /// Typed collection lookup.
    pub async fn list<T: ContentEntity>(&self) -> Vec<T> {
        self.resolve_all(T::KIND)
            .await
            .into_iter()
            .filter_map(T::from_entity)
            .collect()
    }

    pub async fn program(&self, slug: &str) -> Option<Program> {
        self.get(slug).await
    }

    pub async fn service(&self, slug: &str) -> Option<Service> {
        self.get(slug).await
    }

    pub async fn programs(&self) -> Vec<Program> {
        self.list().await
    }

    pub async fn services(&self) -> Vec<Service> {
        self.list().await
    }
}
