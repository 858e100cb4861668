//! Stateless admin endpoints. Each request fetches the rows afresh.

use axum::extract::{Query, State};
use axum::Json;
use needs_core::admin::{AdminList, AdminRow, UnitFilter};
use needs_core::dashboard::Dashboard;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query params for `GET /admin/responses`.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// `"All"` or a unit name. Defaults to `"All"`.
    pub unit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResponseListing {
    pub filter: UnitFilter,
    pub total: usize,
    pub rows: Vec<AdminRow>,
}

/// GET /api/v1/admin/responses
///
/// All responses, newest first, optionally filtered by unit. A store failure
/// is logged and yields an empty list.
pub async fn list_responses(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> AppResult<Json<DataResponse<ResponseListing>>> {
    let filter = match params.unit.as_deref() {
        Some(raw) => UnitFilter::parse(raw)?,
        None => UnitFilter::All,
    };

    let mut list = AdminList::new();
    list.refresh(state.store.as_ref()).await;
    list.set_filter(filter);

    Ok(Json(DataResponse {
        data: ResponseListing {
            filter,
            total: list.rows().len(),
            rows: list.visible(),
        },
    }))
}

/// GET /api/v1/admin/dashboard
///
/// Aggregated view over every response.
pub async fn dashboard(State(state): State<AppState>) -> Json<DataResponse<Dashboard>> {
    let mut list = AdminList::new();
    list.refresh(state.store.as_ref()).await;

    Json(DataResponse {
        data: Dashboard::from_rows(list.rows()),
    })
}
