//! Seam between the domain and the hosted record store.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::response::{NewSurveyResponse, SurveyResponse};

/// Persistence operations the survey needs: one insert per submission and
/// one select of every row, newest first.
#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Insert a single response row.
    async fn insert_response(&self, row: &NewSurveyResponse) -> Result<(), CoreError>;

    /// All rows ordered by `submitted_at` descending.
    async fn list_responses(&self) -> Result<Vec<SurveyResponse>, CoreError>;

    /// Whether the store was given the settings it needs to reach the backend.
    fn is_configured(&self) -> bool {
        true
    }
}
