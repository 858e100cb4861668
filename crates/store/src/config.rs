/// Environment variable holding the store's base URL.
pub const URL_ENV: &str = "SUPABASE_URL";
/// Environment variable holding the store's anonymous access key.
pub const KEY_ENV: &str = "SUPABASE_ANON_KEY";

/// Connection settings for the hosted record store.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Base URL, e.g. `https://abc.supabase.co`. Empty when unset.
    pub url: String,
    /// Anonymous access key sent as `apikey` and bearer token. Empty when unset.
    pub access_key: String,
    /// Per-request timeout in seconds (default: `10`).
    pub request_timeout_secs: u64,
}

impl StoreConfig {
    pub fn new(url: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_key: access_key.into(),
            request_timeout_secs: 10,
        }
    }

    /// Load settings from the environment.
    ///
    /// | Env Var                     | Default |
    /// |-----------------------------|---------|
    /// | `SUPABASE_URL`              | (none)  |
    /// | `SUPABASE_ANON_KEY`         | (none)  |
    /// | `STORE_REQUEST_TIMEOUT_SECS`| `10`    |
    ///
    /// Missing URL or key is logged and startup continues; the first store
    /// call then fails with [`StoreError::NotConfigured`](crate::StoreError).
    pub fn from_env() -> Self {
        let url = std::env::var(URL_ENV).unwrap_or_default();
        let access_key = std::env::var(KEY_ENV).unwrap_or_default();

        let request_timeout_secs: u64 = std::env::var("STORE_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let config = Self {
            url,
            access_key,
            request_timeout_secs,
        };
        if !config.is_complete() {
            tracing::error!(
                "Missing record store settings. Make sure {URL_ENV} and {KEY_ENV} are set."
            );
        }
        config
    }

    pub fn is_complete(&self) -> bool {
        !self.url.trim().is_empty() && !self.access_key.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_requires_url_and_key() {
        assert!(StoreConfig::new("https://x.supabase.co", "anon").is_complete());
        assert!(!StoreConfig::new("", "anon").is_complete());
        assert!(!StoreConfig::new("https://x.supabase.co", "  ").is_complete());
        assert!(!StoreConfig::default().is_complete());
    }
}
