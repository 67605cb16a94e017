use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

use health_tracker_domain::testing::sample_row;

use crate::api::routes::tests::create_test_app;

async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_submission_shows_up_on_dashboard() {
    let (app, _) = create_test_app(vec![sample_row("a", 3, 2)]).await;

    let (_, before) = get_json(&app, "/api/v1/dashboard").await;
    assert_eq!(before["summary"]["total_entries"], json!(1));

    let request = Request::builder()
        .method("POST")
        .uri("/data-entry")
        .header(header::CONTENT_TYPE, mime::APPLICATION_WWW_FORM_URLENCODED.as_ref())
        .body(Body::from("weight=70&temperature=36.6&tension=120%2F80&week=1&day=1"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let (_, after) = get_json(&app, "/api/v1/dashboard").await;
    assert_eq!(after["summary"]["total_entries"], json!(2));
    assert_eq!(after["summary"]["latest_label"], json!("W1D1"));

    let (_, weeks) = get_json(&app, "/api/v1/weeks").await;
    assert_eq!(weeks["weeks"], json!([1, 3]));
}

#[tokio::test]
async fn test_unknown_path_returns_json_not_found() {
    let (app, _) = create_test_app(vec![]).await;

    let (status, body) = get_json(&app, "/nowhere").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("not_found"));
}

#[tokio::test]
async fn test_home_lists_views() {
    let (app, _) = create_test_app(vec![]).await;

    let (status, body) = get_json(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    let paths: Vec<&str> = body["views"]
        .as_array()
        .unwrap()
        .iter()
        .map(|view| view["path"].as_str().unwrap())
        .collect();
    assert!(paths.contains(&"/data-entry"));
    assert!(paths.contains(&"/api/v1/metrics/tension"));
}

#[tokio::test]
async fn test_security_headers_are_set() {
    let (app, _) = create_test_app(vec![]).await;

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    let headers = response.headers();
    assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
    assert_eq!(headers.get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (app, _) = create_test_app(vec![]).await;

    let (status, body) = get_json(&app, "/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/dashboard"].is_object());
}
