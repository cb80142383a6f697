//! Client configuration loaded from environment variables.

/// Configuration for [`ApiClient`](crate::api::ApiClient) and the cache
/// layer built on top of it.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the coaching API (default: `http://localhost:3333`).
    pub base_url: String,
    /// Per-request timeout in seconds (default: `10`).
    pub request_timeout_secs: u64,
    /// How many times a failed read is retried (default: `2`).
    pub retry_count: u32,
    /// How long a fetched snapshot is served without revalidation, in
    /// seconds (default: `30`).
    pub fresh_for_secs: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `API_BASE_URL`         | `http://localhost:3333` |
    /// | `REQUEST_TIMEOUT_SECS` | `10`                    |
    /// | `FETCH_RETRY_COUNT`    | `2`                     |
    /// | `CACHE_FRESH_SECS`     | `30`                    |
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:3333".into());

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let retry_count: u32 = std::env::var("FETCH_RETRY_COUNT")
            .unwrap_or_else(|_| "2".into())
            .parse()
            .expect("FETCH_RETRY_COUNT must be a valid u32");

        let fresh_for_secs: u64 = std::env::var("CACHE_FRESH_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("CACHE_FRESH_SECS must be a valid u64");

        Self {
            base_url,
            request_timeout_secs,
            retry_count,
            fresh_for_secs,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3333".into(),
            request_timeout_secs: 10,
            retry_count: 2,
            fresh_for_secs: 30,
        }
    }
}
