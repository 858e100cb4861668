//! Route definitions for the admin listing and dashboard.
//!
//! Mounted at `/admin` by `api_routes()`. There is no authentication; the
//! view is hidden behind a keyboard shortcut in the client only.

use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// ```text
/// GET    /responses  -> list_responses (?unit=All|<unit name>)
/// GET    /dashboard  -> dashboard
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/responses", get(admin::list_responses))
        .route("/dashboard", get(admin::dashboard))
}
