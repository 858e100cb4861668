//! Route definitions for the survey catalog.
//!
//! Mounted at `/survey` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::survey;
use crate::state::AppState;

/// ```text
/// GET    /           -> get_catalog
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(survey::get_catalog))
}
