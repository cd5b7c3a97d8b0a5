//! Upstream fetch: one HTTP GET that seeds the record store.
//!
//! The post list is fetched once per session from a fixed endpoint with no
//! query parameters. Transport failures are reported as errors for callers
//! that want them; decode failures are absorbed into an empty store so a
//! malformed payload can never crash the pipeline. [`fetch_or_empty`]
//! absorbs both, which is what the dashboard path uses: a failed fetch
//! just renders empty views.

use std::time::Duration;

use crate::error::{FetchError, Result};
use crate::store::{RawPost, RecordStore};

/// The fixed upstream endpoint serving the post list.
pub const DEFAULT_POSTS_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";

/// Configuration for the upstream post fetch.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Endpoint URL to GET the post list from.
    pub endpoint: String,
    /// HTTP timeout for the request.
    pub timeout: Duration,
}

impl FetchConfig {
    /// Creates a config for the given endpoint with a 30s timeout.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the HTTP timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_POSTS_ENDPOINT)
    }
}

/// Decodes an upstream response body into a populated store.
///
/// A body that fails to decode as a post list yields an empty store (with a
/// warning) rather than an error; derived views then render their explicit
/// empty states.
pub fn decode_posts(body: &str) -> RecordStore {
    match serde_json::from_str::<Vec<RawPost>>(body) {
        Ok(posts) => RecordStore::from_posts(posts),
        Err(e) => {
            tracing::warn!("failed to decode post list, substituting empty store: {e}");
            RecordStore::new()
        }
    }
}

/// Fetches the post list and populates a record store.
///
/// Transport problems (client construction, connection, non-2xx status,
/// body read) are returned as errors; a decode failure yields an empty
/// store via [`decode_posts`].
///
/// # Errors
///
/// Returns [`FetchError`] variants for client construction, request
/// transport, HTTP status and body-read failures.
pub fn fetch_posts(config: &FetchConfig) -> Result<RecordStore> {
    let client = reqwest::blocking::Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|e| FetchError::ClientCreate { source: e })?;

    let response = client
        .get(&config.endpoint)
        .send()
        .map_err(|e| FetchError::RequestFailed {
            endpoint: config.endpoint.clone(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            endpoint: config.endpoint.clone(),
            status: status.as_u16(),
        }
        .into());
    }

    let body = response.text().map_err(|e| FetchError::BodyRead {
        endpoint: config.endpoint.clone(),
        source: e,
    })?;

    Ok(decode_posts(&body))
}

/// Fetches the post list, absorbing every failure into an empty store.
///
/// This is the dashboard's fire-and-forget path: errors are logged and the
/// caller gets a store whose derived views all come out empty.
pub fn fetch_or_empty(config: &FetchConfig) -> RecordStore {
    match fetch_posts(config) {
        Ok(store) => store,
        Err(e) => {
            tracing::warn!("post fetch failed, substituting empty store: {e}");
            RecordStore::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_posts() {
        let body = r#"[
            {"userId": 1, "id": 1, "title": "sunt aut", "body": "quia et"},
            {"userId": 1, "id": 2, "title": "qui est", "body": "est rerum"}
        ]"#;

        let store = decode_posts(body);
        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].group_id, 1);
        assert_eq!(store.records()[1].id, 2);
    }

    #[test]
    fn test_decode_failure_substitutes_empty_store() {
        assert!(decode_posts("not json").is_empty());
        assert!(decode_posts("{\"unexpected\": true}").is_empty());
        assert!(decode_posts("").is_empty());
    }

    #[test]
    fn test_decode_caps_at_ingestion_limit() {
        let posts: Vec<String> = (1..=120)
            .map(|i| format!(r#"{{"userId": {}, "id": {i}, "title": "t", "body": "b"}}"#, i % 10))
            .collect();
        let body = format!("[{}]", posts.join(","));

        let store = decode_posts(&body);
        assert_eq!(store.len(), crate::store::MAX_RECORDS);
    }

    #[test]
    fn test_config_builder() {
        let config = FetchConfig::new("http://localhost:8080/posts")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.endpoint, "http://localhost:8080/posts");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_default_config_points_at_fixed_endpoint() {
        let config = FetchConfig::default();
        assert_eq!(config.endpoint, DEFAULT_POSTS_ENDPOINT);
    }
}
