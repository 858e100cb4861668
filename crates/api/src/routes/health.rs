use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the record store URL and access key are both set.
    pub store_configured: bool,
    /// Number of open UI sessions.
    pub sessions: usize,
}

/// GET /health -- returns service health and store configuration status.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_configured = state.store.is_configured();

    let status = if store_configured { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        store_configured,
        sessions: state.sessions.count().await,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
