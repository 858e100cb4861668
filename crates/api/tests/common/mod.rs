#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use needs_api::config::ServerConfig;
use needs_api::router::build_app_router;
use needs_api::sessions::SessionManager;
use needs_api::state::AppState;
use needs_core::error::CoreError;
use needs_core::response::{NewSurveyResponse, SurveyResponse};
use needs_core::store::ResponseStore;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

/// Record store kept in memory. Counts calls so tests can assert the store
/// was (or was not) contacted.
#[derive(Default)]
pub struct InMemoryStore {
    rows: Mutex<Vec<SurveyResponse>>,
    pub inserts: AtomicUsize,
    pub selects: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_rows(rows: Vec<SurveyResponse>) -> Arc<Self> {
        Arc::new(Self {
            rows: Mutex::new(rows),
            ..Self::default()
        })
    }

    pub fn rows(&self) -> Vec<SurveyResponse> {
        self.rows.lock().unwrap().clone()
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn select_count(&self) -> usize {
        self.selects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResponseStore for InMemoryStore {
    async fn insert_response(&self, row: &NewSurveyResponse) -> Result<(), CoreError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        rows.push(row.clone().into_persisted(id));
        Ok(())
    }

    async fn list_responses(&self) -> Result<Vec<SurveyResponse>, CoreError> {
        self.selects.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows();
        rows.sort_by(|a, b| (b.submitted_at, b.id).cmp(&(a.submitted_at, a.id)));
        Ok(rows)
    }
}

/// Record store whose every call fails, as an unreachable backend would.
#[derive(Default)]
pub struct FailingStore {
    pub calls: AtomicUsize,
}

#[async_trait]
impl ResponseStore for FailingStore {
    async fn insert_response(&self, _row: &NewSurveyResponse) -> Result<(), CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CoreError::Store("connection refused".into()))
    }

    async fn list_responses(&self) -> Result<Vec<SurveyResponse>, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CoreError::Store("connection refused".into()))
    }

    fn is_configured(&self) -> bool {
        false
    }
}

/// Build a stored row from a JSON object, filling `id`, `name`, `unit` and
/// `submitted_at` from the arguments.
pub fn stored_row(id: i64, unit: &str, day: u32, extra: serde_json::Value) -> SurveyResponse {
    let mut row = serde_json::json!({
        "id": id,
        "name": format!("Person {id}"),
        "unit": unit,
        "submitted_at": format!("2026-03-{day:02}T12:00:00Z"),
    });
    if let (Some(row), Some(extra)) = (row.as_object_mut(), extra.as_object()) {
        for (k, v) in extra {
            row.insert(k.clone(), v.clone());
        }
    }
    serde_json::from_value(row).unwrap()
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session_idle_secs: 1800,
        session_sweep_secs: 60,
    }
}

/// Build the full application router over the given store, with the same
/// middleware stack production uses.
pub fn build_test_app(store: Arc<dyn ResponseStore>) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        sessions: Arc::new(SessionManager::new()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: &Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Open a session and return its id.
pub async fn open_session(app: &Router) -> String {
    let json = body_json(post(app, "/api/v1/sessions").await).await;
    json["data"]["id"].as_str().unwrap().to_string()
}

/// The admin chord: Ctrl+Shift+A.
pub fn admin_chord() -> serde_json::Value {
    serde_json::json!({ "key": "A", "ctrl": true, "shift": true })
}
