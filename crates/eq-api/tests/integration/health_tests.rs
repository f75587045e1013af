//! Health check endpoint tests.

use axum::http::StatusCode;
use eq_core::HealthStatus;
use tower::ServiceExt;

use super::common::{create_test_router, get_request, send_request};

#[tokio::test]
async fn test_health_endpoint_returns_ok() {
    let (status, body): (StatusCode, HealthStatus) =
        send_request(create_test_router(), get_request("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.status, "ok");
    assert_eq!(body.message, "C.O.R.E. Nervous System Online");
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let response = create_test_router()
        .oneshot(get_request("/api/health"))
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}
