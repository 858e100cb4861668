//! One-shot submission of a complete survey form.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use needs_core::error::CoreError;
use needs_core::form::{FormState, SubmitOutcome, SurveyForm, MISSING_IDENTITY_MESSAGE};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/responses
///
/// Validates name and unit, inserts one row, and returns the acknowledgement.
/// Missing fields return 400 without contacting the store.
pub async fn submit_response(
    State(state): State<AppState>,
    Json(input): Json<SurveyForm>,
) -> AppResult<impl IntoResponse> {
    let mut form = FormState {
        form: input,
        intro_shown: false,
        ..FormState::new()
    };

    match form.submit(state.store.as_ref(), chrono::Utc::now()).await {
        SubmitOutcome::Saved(ack) => Ok((
            StatusCode::CREATED,
            Json(DataResponse { data: ack.render() }),
        )),
        SubmitOutcome::Rejected => Err(CoreError::Validation(
            form.error
                .unwrap_or_else(|| MISSING_IDENTITY_MESSAGE.to_string()),
        )
        .into()),
        SubmitOutcome::Failed => {
            Err(CoreError::Store("Insert into responses failed".to_string()).into())
        }
        SubmitOutcome::Busy => Err(CoreError::Conflict(
            "A submission is already in progress".to_string(),
        )
        .into()),
    }
}
