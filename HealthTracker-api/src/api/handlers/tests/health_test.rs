use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use health_tracker_domain::testing::{loaded_service, MockHealthService};

use super::{body_json, json_request};
use crate::api::routes::create_app;
use crate::api::routes::tests::{create_failing_app, create_test_app};
use crate::state::AppState;

#[tokio::test]
async fn test_health_ok_after_load() {
    let (app, _) = create_test_app(vec![]).await;

    let response = app.oneshot(json_request("GET", "/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["components"]["backend"]["status"], json!("ok"));
    assert_eq!(body["environment"], json!("development"));
    assert_eq!(body["version"], json!(env!("CARGO_PKG_VERSION")));
}

#[tokio::test]
async fn test_health_degraded_without_data() {
    let (app, _) = create_failing_app();

    let response = app.oneshot(json_request("GET", "/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["status"], json!("degraded"));
    assert_eq!(body["components"]["backend"]["status"], json!("error"));
    assert_eq!(body["components"]["api"]["status"], json!("ok"));
}

#[tokio::test]
async fn test_health_uses_injected_service() {
    let (service, _) = loaded_service(vec![]).await;
    let state = AppState::new(service)
        .with_health_service(Arc::new(MockHealthService::new().with_unhealthy_backend()))
        .with_environment("staging");
    let app = create_app(state);

    let response = app.oneshot(json_request("GET", "/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["status"], json!("error"));
    assert_eq!(body["environment"], json!("staging"));
    assert_eq!(body["components"]["backend"]["message"], json!("Record store unavailable"));
}
