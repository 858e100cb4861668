/// Error type for record store calls.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// URL or access key was missing at startup.
    #[error("Record store is not configured (missing URL or access key)")]
    NotConfigured,

    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The store answered with a non-2xx status.
    #[error("Record store returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The response body did not match the expected row shape.
    #[error("Failed to decode record store response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<StoreError> for needs_core::error::CoreError {
    fn from(err: StoreError) -> Self {
        needs_core::error::CoreError::Store(err.to_string())
    }
}
