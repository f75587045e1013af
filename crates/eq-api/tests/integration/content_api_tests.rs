//! Content store endpoint tests.

use axum::http::StatusCode;
use eq_core::{ApiResponse, Catalog, Program, Service};
use serde_json::Value;

use super::common::{create_test_router, get_request, send_request};

#[tokio::test]
async fn test_list_programs_returns_envelope() {
    let (status, body): (StatusCode, ApiResponse<Vec<Program>>) =
        send_request(create_test_router(), get_request("/api/programs")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.success);
    let slugs: Vec<String> = body.data.unwrap().into_iter().map(|p| p.slug).collect();
    assert_eq!(
        slugs,
        vec!["programa-angustia", "programa-culpa", "programa-irritabilidad"]
    );
}

#[tokio::test]
async fn test_get_program_by_slug() {
    let (status, body): (StatusCode, ApiResponse<Program>) =
        send_request(create_test_router(), get_request("/api/programs/programa-culpa")).await;

    assert_eq!(status, StatusCode::OK);
    let program = body.into_data().unwrap();
    assert_eq!(program.title, "Redefinir la Culpa");
    assert_eq!(program.price, 250000);
}

#[tokio::test]
async fn test_unknown_program_is_404_envelope() {
    let (status, body): (StatusCode, Value) =
        send_request(create_test_router(), get_request("/api/programs/no-existe")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(body["data"].is_null());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_list_services_matches_catalog() {
    let (status, body): (StatusCode, ApiResponse<Vec<Service>>) =
        send_request(create_test_router(), get_request("/api/services")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.data.unwrap(), Catalog::bundled().services().to_vec());
}

#[tokio::test]
async fn test_get_service_uses_camel_case_fields() {
    let (status, body): (StatusCode, Value) =
        send_request(create_test_router(), get_request("/api/services/psicologia")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["slug"], "psicologia");
    assert!(body["data"]["interventionPoints"].is_array());
    assert!(body["data"]["ctaMessage"].is_string());
}

#[tokio::test]
async fn test_unknown_service_is_404_envelope() {
    let (status, body): (StatusCode, Value) =
        send_request(create_test_router(), get_request("/api/services/no-existe")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (status, body): (StatusCode, Value) =
        send_request(create_test_router(), get_request("/api-docs/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/programs/{slug}"].is_object());
}
