//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get, FailingStore, InMemoryStore};
use tower::ServiceExt;

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let app = common::build_test_app(InMemoryStore::new());
    let response = get(&app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["store_configured"], true);
    assert_eq!(json["sessions"], 0);
}

#[tokio::test]
async fn health_reports_degraded_when_store_unconfigured() {
    let app = common::build_test_app(Arc::new(FailingStore::default()));
    let json = body_json(get(&app, "/health").await).await;

    assert_eq!(json["status"], "degraded");
    assert_eq!(json["store_configured"], false);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_test_app(InMemoryStore::new());
    let response = get(&app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = common::build_test_app(InMemoryStore::new());
    let response = get(&app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn cors_preflight_returns_correct_headers() {
    let app = common::build_test_app(InMemoryStore::new());

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/responses")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    let allow_origin = headers
        .get("access-control-allow-origin")
        .expect("Missing Access-Control-Allow-Origin header")
        .to_str()
        .unwrap();
    assert_eq!(allow_origin, "http://localhost:5173");

    let allow_methods = headers
        .get("access-control-allow-methods")
        .expect("Missing Access-Control-Allow-Methods header")
        .to_str()
        .unwrap();
    assert!(
        allow_methods.contains("POST"),
        "Allow-Methods should contain POST, got: {allow_methods}"
    );
}

#[tokio::test]
async fn caller_request_id_is_echoed() {
    let app = common::build_test_app(InMemoryStore::new());

    let request = Request::builder()
        .uri("/api/v1/survey")
        .header("x-request-id", "survey-page-42")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], "survey-page-42");
}

#[tokio::test]
async fn cors_ignores_unlisted_origin() {
    let app = common::build_test_app(InMemoryStore::new());

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/sessions")
        .header("Origin", "http://elsewhere.test")
        .header("Access-Control-Request-Method", "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
