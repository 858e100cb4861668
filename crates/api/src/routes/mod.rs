pub mod admin;
pub mod health;
pub mod responses;
pub mod sessions;
pub mod survey;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /survey                                          question catalog (GET)
///
/// /responses                                       submit a response (POST)
///
/// /admin/responses                                 list rows, ?unit= filter (GET)
/// /admin/dashboard                                 derived dashboard (GET)
///
/// /sessions                                        open a session (POST)
/// /sessions/{id}                                   snapshot, close (GET, DELETE)
/// /sessions/{id}/keys                              key press (POST)
/// /sessions/{id}/form                              set a field (PATCH)
/// /sessions/{id}/form/begin                        dismiss intro (POST)
/// /sessions/{id}/form/toggle                       toggle a multi-select tag (POST)
/// /sessions/{id}/form/submit                       submit the draft (POST)
/// /sessions/{id}/admin/filter                      unit filter (PUT)
/// /sessions/{id}/admin/rows/{index}                expand/collapse a row (POST)
/// /sessions/{id}/admin/refresh                     re-fetch rows (POST)
/// /sessions/{id}/admin/dashboard                   dashboard over fetched rows (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Survey catalog used to render the form.
        .nest("/survey", survey::router())
        // One-shot submission.
        .nest("/responses", responses::router())
        // Admin listing and dashboard.
        .nest("/admin", admin::router())
        // Server-side UI sessions.
        .nest("/sessions", sessions::router())
}
