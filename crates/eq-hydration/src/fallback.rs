//! Fallback lookups.

use crate::traits::FallbackLookup;
use eq_core::{Catalog, CollectionKind, Entity};
use std::sync::atomic::{AtomicUsize, Ordering};

/// The catalog compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledFallback;

impl FallbackLookup for BundledFallback {
    fn find(&self, kind: CollectionKind, slug: &str) -> Option<Entity> {
        Catalog::bundled().find(kind, slug)
    }

    fn list(&self, kind: CollectionKind) -> Vec<Entity> {
        Catalog::bundled().list(kind)
    }
}

/// Wraps a lookup and counts how often it is consulted.
#[derive(Debug, Default)]
pub struct CountingFallback<F> {
    inner: F,
    lookups: AtomicUsize,
    listings: AtomicUsize,
}

impl<F: FallbackLookup> CountingFallback<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            lookups: AtomicUsize::new(0),
            listings: AtomicUsize::new(0),
        }
    }

    /// Number of single-entity lookups.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Number of collection listings.
    pub fn listings(&self) -> usize {
        self.listings.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.lookups() + self.listings()
    }
}

impl<F: FallbackLookup> FallbackLookup for CountingFallback<F> {
    fn find(&self, kind: CollectionKind, slug: &str) -> Option<Entity> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find(kind, slug)
    }

    fn list(&self, kind: CollectionKind) -> Vec<Entity> {
        self.listings.fetch_add(1, Ordering::SeqCst);
        self.inner.list(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_fallback_finds_programs() {
        let entity = BundledFallback
            .find(CollectionKind::Program, "programa-irritabilidad")
            .unwrap();
        assert_eq!(entity.kind(), CollectionKind::Program);
        assert!(BundledFallback.find(CollectionKind::Program, "psicologia").is_none());
    }

    #[test]
    fn test_counting_fallback_counts_each_kind_of_call() {
        let fallback = CountingFallback::new(BundledFallback);
        assert_eq!(fallback.total(), 0);

        fallback.find(CollectionKind::Service, "psiquiatria");
        fallback.find(CollectionKind::Service, "no-existe");
        fallback.list(CollectionKind::Program);

        assert_eq!(fallback.lookups(), 2);
        assert_eq!(fallback.listings(), 1);
        assert_eq!(fallback.total(), 3);
    }
}
