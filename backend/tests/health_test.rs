//! Integration tests for health check endpoints

mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health_endpoint() {
    let app = common::TestApp::new();

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_liveness_endpoint() {
    let app = common::TestApp::new();

    let (status, body) = app.get("/health/live").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_readiness_endpoint() {
    let app = common::TestApp::new();

    let (status, body) = app.get("/health/ready").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_unknown_route_uses_error_envelope() {
    let app = common::TestApp::new();

    let (status, body) = app.get("/api/v2/anything").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errors"][0]["code"], "NOT_FOUND");
}
