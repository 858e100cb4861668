//! Minimal REST client: one insert call, one select call.
//!
//! Speaks the PostgREST dialect: rows live under `/rest/v1/{table}`, filters
//! are `column=eq.value` query pairs, ordering is `order=column.desc`.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::StoreConfig;
use crate::error::StoreError;

/// Path prefix for table endpoints.
const REST_PREFIX: &str = "/rest/v1";

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Ordering for a select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub descending: bool,
}

/// Columns, equality filters and ordering for a select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    pub columns: String,
    pub filters: Vec<(String, String)>,
    pub order: Option<Order>,
}

impl Default for SelectQuery {
    fn default() -> Self {
        Self {
            columns: "*".to_string(),
            filters: Vec::new(),
            order: None,
        }
    }
}

impl SelectQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((column.into(), value.into()));
        self
    }

    pub fn order_desc(mut self, column: impl Into<String>) -> Self {
        self.order = Some(Order {
            column: column.into(),
            descending: true,
        });
        self
    }

    pub fn order_asc(mut self, column: impl Into<String>) -> Self {
        self.order = Some(Order {
            column: column.into(),
            descending: false,
        });
        self
    }

    /// Query-string pairs in PostgREST syntax.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.columns.clone())];
        for (column, value) in &self.filters {
            params.push((column.clone(), format!("eq.{value}")));
        }
        if let Some(order) = &self.order {
            let dir = if order.descending { "desc" } else { "asc" };
            params.push(("order".to_string(), format!("{}.{dir}", order.column)));
        }
        params
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Handle to the hosted record store.
///
/// Cheap to clone; the inner `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct StoreClient {
    client: reqwest::Client,
    config: StoreConfig,
}

impl StoreClient {
    /// Build a client. Never fails on missing settings; calls fail instead.
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs.max(1)))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_complete()
    }

    fn table_url(&self, table: &str) -> Result<String, StoreError> {
        if !self.is_configured() {
            return Err(StoreError::NotConfigured);
        }
        Ok(format!(
            "{}{REST_PREFIX}/{table}",
            self.config.url.trim_end_matches('/')
        ))
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.config.access_key)
            .bearer_auth(&self.config.access_key)
    }

    /// Insert rows into `table`. The store's representation is not returned.
    pub async fn insert<T: Serialize + Sync>(
        &self,
        table: &str,
        rows: &[T],
    ) -> Result<(), StoreError> {
        let url = self.table_url(table)?;
        let response = self
            .authorized(self.client.post(&url))
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await?;
        check_status(response).await?;
        tracing::debug!(table, rows = rows.len(), "Inserted rows");
        Ok(())
    }

    /// Select rows from `table`.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &SelectQuery,
    ) -> Result<Vec<T>, StoreError> {
        let url = self.table_url(table)?;
        let response = self
            .authorized(self.client.get(&url))
            .query(&query.to_params())
            .send()
            .await?;
        let response = check_status(response).await?;
        let bytes = response.bytes().await?;
        let rows: Vec<T> = serde_json::from_slice(&bytes)?;
        tracing::debug!(table, rows = rows.len(), "Selected rows");
        Ok(rows)
    }
}

/// Turn a non-2xx response into [`StoreError::HttpStatus`] carrying the body.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::HttpStatus {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn select_all_ordered_desc_params() {
        let query = SelectQuery::all().order_desc("submitted_at");
        assert_eq!(
            query.to_params(),
            vec![
                ("select".to_string(), "*".to_string()),
                ("order".to_string(), "submitted_at.desc".to_string()),
            ]
        );
    }

    #[test]
    fn filters_use_eq_operator() {
        let query = SelectQuery::all().eq("unit", "Registrar").order_asc("id");
        let params = query.to_params();
        assert!(params.contains(&("unit".to_string(), "eq.Registrar".to_string())));
        assert!(params.contains(&("order".to_string(), "id.asc".to_string())));
    }

    #[tokio::test]
    async fn unconfigured_client_fails_on_first_call() {
        let client = StoreClient::new(StoreConfig::default()).unwrap();
        assert!(!client.is_configured());

        let result = client
            .select::<serde_json::Value>("responses", &SelectQuery::all())
            .await;
        assert_matches!(result, Err(StoreError::NotConfigured));

        let result = client.insert("responses", &[serde_json::json!({})]).await;
        assert_matches!(result, Err(StoreError::NotConfigured));
    }

    #[test]
    fn table_url_trims_trailing_slash() {
        let client = StoreClient::new(StoreConfig::new("https://x.supabase.co/", "k")).unwrap();
        assert_eq!(
            client.table_url("responses").unwrap(),
            "https://x.supabase.co/rest/v1/responses"
        );
    }

    #[test]
    fn http_status_error_display() {
        let err = StoreError::HttpStatus {
            status: 401,
            body: "Invalid API key".into(),
        };
        assert_eq!(err.to_string(), "Record store returned HTTP 401: Invalid API key");
    }
}
