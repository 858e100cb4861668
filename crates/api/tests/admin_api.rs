//! Integration tests for the stateless admin listing and dashboard.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get, stored_row, FailingStore, InMemoryStore};
use serde_json::json;

fn seeded() -> Arc<InMemoryStore> {
    InMemoryStore::with_rows(vec![
        stored_row(
            1,
            "Admissions",
            1,
            json!({ "confidence": 2, "lifecycle_role": ["pre_enroll", "transition"], "literacy_level": "1" }),
        ),
        stored_row(
            2,
            "Registrar",
            2,
            json!({ "confidence": 4, "lifecycle_role": ["transition", "year_round"], "magic_wand": "Live holds report" }),
        ),
        stored_row(
            3,
            "One-Stop",
            3,
            json!({ "lifecycle_role": ["transition", "all"], "blindspot": "Walk-in volume" }),
        ),
        stored_row(4, "Financial Aid", 4, json!({ "lifecycle_role": ["return"] })),
        stored_row(5, "Business Services", 5, json!({ "lifecycle_role": ["year_round"] })),
    ])
}

#[tokio::test]
async fn list_returns_rows_newest_first() {
    let app = common::build_test_app(seeded());
    let response = get(&app, "/api/v1/admin/responses").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["filter"], "All");
    assert_eq!(data["total"], 5);

    let rows = data["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0]["id"], 5);
    assert_eq!(rows[4]["id"], 1);
    assert!(rows.iter().all(|r| r["expanded"] == false));
}

#[tokio::test]
async fn list_filters_by_unit() {
    let app = common::build_test_app(seeded());
    let json = body_json(get(&app, "/api/v1/admin/responses?unit=Registrar").await).await;

    let data = &json["data"];
    assert_eq!(data["filter"], "Registrar");
    assert_eq!(data["total"], 5);
    let rows = data["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["unit"], "Registrar");
}

#[tokio::test]
async fn unknown_unit_filter_is_rejected() {
    let app = common::build_test_app(seeded());
    let response = get(&app, "/api/v1/admin/responses?unit=Athletics").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn store_failure_yields_empty_list() {
    let app = common::build_test_app(Arc::new(FailingStore::default()));
    let response = get(&app, "/api/v1/admin/responses").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 0);
    assert!(json["data"]["rows"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn dashboard_aggregates_rows() {
    let app = common::build_test_app(seeded());
    let response = get(&app, "/api/v1/admin/dashboard").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];

    assert_eq!(data["total_responses"], 5);
    assert_eq!(data["submitted_units"], 5);
    assert_eq!(data["pending_units"], json!(["Center for Pre-College Programs"]));
    assert_eq!(data["average_confidence"], 3.0);

    let transition = data["lifecycle_overlap"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["stage"] == "transition")
        .unwrap();
    assert_eq!(transition["count"], 3);
    assert_eq!(transition["total"], 5);

    let stages = data["lifecycle_overlap"].as_array().unwrap();
    assert_eq!(stages.len(), 5);
    assert!(stages.iter().all(|s| s["stage"] != "all"));

    assert_eq!(data["magic_wands"][0]["unit"], "Registrar");
    assert_eq!(data["blindspots"][0]["text"], "Walk-in volume");
}

#[tokio::test]
async fn dashboard_over_empty_store() {
    let app = common::build_test_app(InMemoryStore::new());
    let json = body_json(get(&app, "/api/v1/admin/dashboard").await).await;
    let data = &json["data"];

    assert_eq!(data["total_responses"], 0);
    assert!(data["average_confidence"].is_null());
    assert_eq!(data["pending_units"].as_array().unwrap().len(), 6);
}
