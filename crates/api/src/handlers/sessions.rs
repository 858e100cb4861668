//! Handlers for server-side UI sessions.
//!
//! Every mutating endpoint returns the full session snapshot so the client
//! can re-render from a single payload.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use needs_core::admin::UnitFilter;
use needs_core::dashboard::Dashboard;
use needs_core::error::CoreError;
use needs_core::form::{ArrayToggle, FieldUpdate, SubmitOutcome};
use needs_core::shell::KeyEvent;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::sessions::SessionHandle;
use crate::state::AppState;

/// Request body for `PUT /sessions/{id}/admin/filter`.
#[derive(Debug, Deserialize)]
pub struct FilterInput {
    pub filter: UnitFilter,
}

async fn find_session(state: &AppState, id: Uuid) -> AppResult<SessionHandle> {
    state.sessions.get(id).await.ok_or_else(|| {
        CoreError::NotFound {
            entity: "Session",
            id: id.to_string(),
        }
        .into()
    })
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// POST /api/v1/sessions
///
/// Open a session on the form view with the admin shortcut registered.
pub async fn create_session(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let handle = state.sessions.create().await;
    let snapshot = handle.lock().await.snapshot();
    Ok((StatusCode::CREATED, Json(DataResponse { data: snapshot })))
}

/// GET /api/v1/sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let handle = find_session(&state, id).await?;
    let snapshot = handle.lock().await.snapshot();
    Ok(Json(DataResponse { data: snapshot }))
}

/// DELETE /api/v1/sessions/{id}
///
/// Tear down the session, deregistering its shortcut listener.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::NotFound {
            entity: "Session",
            id: id.to_string(),
        }
        .into())
    }
}

/// POST /api/v1/sessions/{id}/keys
///
/// Deliver a key press to the session's shortcut listeners. Entering the
/// admin view fetches rows the first time; the session lock is not held
/// during the fetch.
pub async fn key_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(event): Json<KeyEvent>,
) -> AppResult<impl IntoResponse> {
    let handle = find_session(&state, id).await?;

    let needs_rows = {
        let mut session = handle.lock().await;
        session.handle_key(&event);
        session.needs_admin_rows()
    };

    if needs_rows {
        let result = state.store.list_responses().await;
        let mut session = handle.lock().await;
        if !session.admin.is_loaded() {
            session.admin.apply_fetch(result);
        }
    }

    let snapshot = handle.lock().await.snapshot();
    Ok(Json(DataResponse { data: snapshot }))
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// POST /api/v1/sessions/{id}/form/begin
pub async fn begin_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let handle = find_session(&state, id).await?;
    let mut session = handle.lock().await;
    session.require_form()?;
    session.form.begin();
    Ok(Json(DataResponse {
        data: session.snapshot(),
    }))
}

/// PATCH /api/v1/sessions/{id}/form
///
/// Body: `{ "field": "<name>", "value": <value> }`.
pub async fn update_field(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<FieldUpdate>,
) -> AppResult<impl IntoResponse> {
    let handle = find_session(&state, id).await?;
    let mut session = handle.lock().await;
    session.require_form()?;
    session.form.update(update)?;
    Ok(Json(DataResponse {
        data: session.snapshot(),
    }))
}

/// POST /api/v1/sessions/{id}/form/toggle
///
/// Body: `{ "field": "training_methods" | "lifecycle_role", "value": "<tag>" }`.
pub async fn toggle_field(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(toggle): Json<ArrayToggle>,
) -> AppResult<impl IntoResponse> {
    let handle = find_session(&state, id).await?;
    let mut session = handle.lock().await;
    session.require_form()?;
    session.form.toggle(toggle);
    Ok(Json(DataResponse {
        data: session.snapshot(),
    }))
}

/// POST /api/v1/sessions/{id}/form/submit
///
/// Validation and store failures are reported through `form.error` in the
/// returned snapshot; the form contents are kept. On success the session
/// moves to the thank-you view and the form starts over blank. The session lock is released while the
/// insert runs, so a concurrent submit gets 409.
pub async fn submit_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let handle = find_session(&state, id).await?;

    let pending = {
        let mut session = handle.lock().await;
        session.require_form()?;
        match session.form.begin_submit(chrono::Utc::now()) {
            Ok(pending) => pending,
            Err(CoreError::Validation(_)) => {
                return Ok(Json(DataResponse {
                    data: session.snapshot(),
                }));
            }
            Err(e) => return Err(e.into()),
        }
    };

    let result = state.store.insert_response(&pending.row).await;

    let mut session = handle.lock().await;
    if let SubmitOutcome::Saved(ack) = session.form.finish_submit(&pending, result) {
        session.views.submitted(ack);
    }
    Ok(Json(DataResponse {
        data: session.snapshot(),
    }))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// PUT /api/v1/sessions/{id}/admin/filter
pub async fn set_filter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<FilterInput>,
) -> AppResult<impl IntoResponse> {
    let handle = find_session(&state, id).await?;
    let mut session = handle.lock().await;
    session.require_admin()?;
    session.admin.set_filter(input.filter);
    Ok(Json(DataResponse {
        data: session.snapshot(),
    }))
}

/// POST /api/v1/sessions/{id}/admin/rows/{index}
///
/// Expand the row, or collapse it if already expanded.
pub async fn toggle_row(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> AppResult<impl IntoResponse> {
    let handle = find_session(&state, id).await?;
    let mut session = handle.lock().await;
    session.require_admin()?;
    session.admin.toggle_row(index)?;
    Ok(Json(DataResponse {
        data: session.snapshot(),
    }))
}

/// POST /api/v1/sessions/{id}/admin/refresh
///
/// Re-fetch all rows. Like the first fetch, it runs outside the session lock.
pub async fn refresh_admin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let handle = find_session(&state, id).await?;
    handle.lock().await.require_admin()?;

    let result = state.store.list_responses().await;

    let mut session = handle.lock().await;
    session.admin.apply_fetch(result);
    Ok(Json(DataResponse {
        data: session.snapshot(),
    }))
}

/// GET /api/v1/sessions/{id}/admin/dashboard
///
/// Aggregation over the rows the session already fetched.
pub async fn session_dashboard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let handle = find_session(&state, id).await?;
    let session = handle.lock().await;
    session.require_admin()?;
    Ok(Json(DataResponse {
        data: Dashboard::from_rows(session.admin.rows()),
    }))
}
