//! Route definitions for one-shot survey submission.
//!
//! Mounted at `/responses` by `api_routes()`.

use axum::routing::post;
use axum::Router;

use crate::handlers::responses;
use crate::state::AppState;

/// ```text
/// POST   /           -> submit_response
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(responses::submit_response))
}
