//! Handler for the survey question catalog.

use axum::Json;
use needs_core::survey::SurveyCatalog;

use crate::response::DataResponse;

/// GET /api/v1/survey
///
/// Units, rating scales and option labels needed to render the form.
pub async fn get_catalog() -> Json<DataResponse<SurveyCatalog>> {
    Json(DataResponse {
        data: SurveyCatalog::build(),
    })
}
