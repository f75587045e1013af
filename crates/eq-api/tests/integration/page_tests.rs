//! Rendered page tests.

use axum::http::StatusCode;
use eq_hydration::MockContentSource;
use std::sync::Arc;

use super::common::{create_router_with_source, create_test_router, get_request, send_request_raw};

#[tokio::test]
async fn test_home_lists_programs_and_services() {
    let (status, html) = send_request_raw(create_test_router(), get_request("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Redefinir la Culpa"));
    assert!(html.contains("Psicología Clínica"));
    assert!(html.contains("site-footer"));
}

#[tokio::test]
async fn test_home_falls_back_when_store_is_down() {
    let app = create_router_with_source(Arc::new(MockContentSource::unreachable("store")));
    let (status, html) = send_request_raw(app, get_request("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Redefinir la Culpa"));
}

#[tokio::test]
async fn test_program_page_with_store_down_uses_fallback() {
    let app = create_router_with_source(Arc::new(MockContentSource::unreachable("store")));
    let (status, html) = send_request_raw(app, get_request("/programa-culpa")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Redefinir la Culpa"));
    assert!(html.contains("$250.000"));
    assert!(!html.contains("site-footer"));
}

#[tokio::test]
async fn test_dynamic_slug_not_in_store_is_not_found() {
    let (status, html) =
        send_request_raw(create_test_router(), get_request("/no-existe")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Programa no encontrado (no-existe)."));
    assert!(html.contains("Volver al inicio"));
}

#[tokio::test]
async fn test_bound_service_route_renders_service() {
    let (status, html) =
        send_request_raw(create_test_router(), get_request("/psicologia")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Psicología Clínica"));
    assert!(html.contains("https://wa.me/56930179724?text="));
}

#[tokio::test]
async fn test_trailing_slash_resolves_same_page() {
    let (status, html) =
        send_request_raw(create_test_router(), get_request("/psiquiatria/")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Psiquiatría y Diagnóstico"));
}

#[tokio::test]
async fn test_nested_path_is_unknown_page() {
    let (status, html) =
        send_request_raw(create_test_router(), get_request("/programas/extra")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Volver al inicio"));
}

#[tokio::test]
async fn test_percent_encoded_slug_is_fetched_decoded() {
    let source = Arc::new(MockContentSource::new("store"));
    let app = create_router_with_source(source.clone());
    let (status, html) = send_request_raw(app, get_request("/programa%2Dculpa")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Redefinir la Culpa"));

    let history = source.history().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].slug.as_deref(), Some("programa-culpa"));
}
