//! Response repository on top of [`StoreClient`].

use async_trait::async_trait;
use needs_core::error::CoreError;
use needs_core::response::{
    NewSurveyResponse, SurveyResponse, RESPONSES_TABLE, SUBMITTED_AT_COLUMN,
};
use needs_core::store::ResponseStore;

use crate::client::{SelectQuery, StoreClient};

/// Reads and writes the `responses` table.
#[derive(Debug, Clone)]
pub struct ResponseRepo {
    client: StoreClient,
}

impl ResponseRepo {
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResponseStore for ResponseRepo {
    async fn insert_response(&self, row: &NewSurveyResponse) -> Result<(), CoreError> {
        self.client
            .insert(RESPONSES_TABLE, std::slice::from_ref(row))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, table = RESPONSES_TABLE, "Insert failed");
                CoreError::from(e)
            })
    }

    async fn list_responses(&self) -> Result<Vec<SurveyResponse>, CoreError> {
        let query = SelectQuery::all().order_desc(SUBMITTED_AT_COLUMN);
        self.client
            .select(RESPONSES_TABLE, &query)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, table = RESPONSES_TABLE, "Select failed");
                CoreError::from(e)
            })
    }

    fn is_configured(&self) -> bool {
        self.client.is_configured()
    }
}
