//! Route definitions for server-side UI sessions.
//!
//! Mounted at `/sessions` by `api_routes()`.

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers::sessions;
use crate::state::AppState;

/// Session routes.
///
/// ```text
/// POST   /                            -> create_session
/// GET    /{id}                        -> get_session
/// DELETE /{id}                        -> delete_session
/// POST   /{id}/keys                   -> key_event
/// POST   /{id}/form/begin             -> begin_form
/// PATCH  /{id}/form                   -> update_field
/// POST   /{id}/form/toggle            -> toggle_field
/// POST   /{id}/form/submit            -> submit_form
/// PUT    /{id}/admin/filter           -> set_filter
/// POST   /{id}/admin/rows/{index}     -> toggle_row
/// POST   /{id}/admin/refresh          -> refresh_admin
/// GET    /{id}/admin/dashboard        -> session_dashboard
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(sessions::create_session))
        .route(
            "/{id}",
            get(sessions::get_session).delete(sessions::delete_session),
        )
        .route("/{id}/keys", post(sessions::key_event))
        .route("/{id}/form", patch(sessions::update_field))
        .route("/{id}/form/begin", post(sessions::begin_form))
        .route("/{id}/form/toggle", post(sessions::toggle_field))
        .route("/{id}/form/submit", post(sessions::submit_form))
        .route("/{id}/admin/filter", put(sessions::set_filter))
        .route("/{id}/admin/rows/{index}", post(sessions::toggle_row))
        .route("/{id}/admin/refresh", post(sessions::refresh_admin))
        .route("/{id}/admin/dashboard", get(sessions::session_dashboard))
}
