//! Hydration against a live server.
//!
//! These tests run the real HTTP content source against the site server
//! bound to an ephemeral port.

use eq_core::{Catalog, CollectionKind};
use eq_hydration::{
    BundledFallback, CountingFallback, HttpContentSource, HydrationClient, SourceConfig,
};
use std::sync::Arc;

use super::common::{closed_addr, spawn_server};

fn client_for(base_url: &str) -> (HydrationClient, Arc<CountingFallback<BundledFallback>>) {
    let source = HttpContentSource::new(SourceConfig::new(base_url).with_timeout(5)).unwrap();
    let fallback = Arc::new(CountingFallback::new(BundledFallback));
    (
        HydrationClient::with_fallback(Arc::new(source), fallback.clone()),
        fallback,
    )
}

#[tokio::test]
async fn test_live_store_returns_requested_slugs() {
    let server = spawn_server().await;
    let (client, fallback) = client_for(&server.api_url());

    for slug in Catalog::bundled().slugs(CollectionKind::Service) {
        let entity = client
            .resolve(CollectionKind::Service, slug)
            .await
            .unwrap();
        assert_eq!(entity.slug(), slug);
    }
    assert_eq!(fallback.total(), 0);
}

#[tokio::test]
async fn test_live_store_404_never_consults_fallback() {
    let server = spawn_server().await;
    let (client, fallback) = client_for(&server.api_url());

    assert!(client.program("no-existe").await.is_none());
    assert_eq!(fallback.total(), 0);
}

#[tokio::test]
async fn test_live_store_listing_is_stable() {
    let server = spawn_server().await;
    let (client, fallback) = client_for(&server.api_url());

    let first: Vec<String> = client.programs().await.into_iter().map(|p| p.slug).collect();
    let second: Vec<String> = client.programs().await.into_iter().map(|p| p.slug).collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
    assert_eq!(fallback.total(), 0);
}

#[tokio::test]
async fn test_unreachable_store_falls_back() {
    let addr = closed_addr().await;
    let (client, fallback) = client_for(&format!("http://{}/api", addr));

    let program = client.program("programa-culpa").await.unwrap();
    assert_eq!(program.title, "Redefinir la Culpa");
    assert_eq!(program.price, 250000);
    assert_eq!(fallback.lookups(), 1);

    assert_eq!(client.services().await.len(), 2);
    assert_eq!(fallback.listings(), 1);
}

#[tokio::test]
async fn test_health_check_over_http() {
    let server = spawn_server().await;
    let source = HttpContentSource::new(SourceConfig::new(&server.api_url())).unwrap();

    use eq_hydration::ContentSource;
    let health = source.health_check().await.unwrap();
    assert_eq!(health.message, "C.O.R.E. Nervous System Online");
}
