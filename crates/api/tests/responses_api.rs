//! Integration tests for one-shot submission via `POST /api/v1/responses`.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, post_json, FailingStore, InMemoryStore};
use needs_core::survey::{LifecycleStage, TrainingMethod, Unit};
use serde_json::json;

#[tokio::test]
async fn submit_stores_one_row_and_acknowledges() {
    let store = InMemoryStore::new();
    let app = common::build_test_app(store.clone());

    let response = post_json(
        &app,
        "/api/v1/responses",
        json!({
            "name": "  Jordan Alvarez ",
            "unit": "Registrar",
            "confidence": 4,
            "literacy_level": "2",
            "training_methods": ["peer", "trial"],
            "lifecycle_role": ["year_round"],
            "magic_wand": "One dashboard for holds",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Jordan Alvarez");
    assert_eq!(json["data"]["unit"], "Registrar");
    assert_eq!(json["data"]["headline"], "Thank you, Jordan.");

    let rows = store.rows();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.name, "Jordan Alvarez");
    assert_eq!(row.unit, Unit::Registrar);
    assert_eq!(row.confidence, Some(4));
    assert_eq!(
        row.training_methods,
        vec![TrainingMethod::Peer, TrainingMethod::Trial]
    );
    assert_eq!(row.lifecycle_role, vec![LifecycleStage::YearRound]);
    assert_eq!(row.unused_reports, "");
}

#[tokio::test]
async fn missing_name_is_rejected_without_contacting_store() {
    let store = InMemoryStore::new();
    let app = common::build_test_app(store.clone());

    let response = post_json(
        &app,
        "/api/v1/responses",
        json!({ "name": "   ", "unit": "Admissions" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(
        json["error"],
        "Please enter your name and unit before submitting."
    );
    assert_eq!(store.insert_count(), 0);
}

#[tokio::test]
async fn missing_unit_is_rejected_without_contacting_store() {
    let store = InMemoryStore::new();
    let app = common::build_test_app(store.clone());

    let response = post_json(&app, "/api/v1/responses", json!({ "name": "Sam" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.insert_count(), 0);
}

#[tokio::test]
async fn out_of_range_confidence_is_rejected() {
    let store = InMemoryStore::new();
    let app = common::build_test_app(store.clone());

    let response = post_json(
        &app,
        "/api/v1/responses",
        json!({ "name": "Sam", "unit": "One-Stop", "confidence": 9 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.insert_count(), 0);
}

#[tokio::test]
async fn store_failure_returns_502_with_generic_message() {
    let store = Arc::new(FailingStore::default());
    let app = common::build_test_app(store.clone());

    let response = post_json(
        &app,
        "/api/v1/responses",
        json!({ "name": "Sam", "unit": "Financial Aid" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "STORE_ERROR");
    assert_eq!(
        json["error"],
        "Something went wrong saving your response. Please try again."
    );
    assert_eq!(store.calls.load(Ordering::SeqCst), 1);
}
