//! Outbound HTTP for the movie API.
//!
//! A fetcher performs exactly one GET per call and never retries; retry
//! policy belongs to the caller.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchError;

/// Default bound on a single request so a hung call cannot keep the store
/// loading forever.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches a URL and decodes the body as JSON.
#[async_trait]
pub trait JsonFetcher: Send + Sync + std::fmt::Debug {
    /// Issues one GET for `url`.
    ///
    /// # Errors
    /// - `SearchError::Transport` - Network failure, timeout or non-2xx status
    /// - `SearchError::Parse` - Body is not valid JSON
    async fn fetch_json(&self, url: &str) -> Result<Value, SearchError>;
}

/// `reqwest` backed fetcher with an explicit timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a fetcher with the given request timeout and user agent.
    ///
    /// # Errors
    /// - `SearchError::Transport` - TLS backend or client could not be initialised
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| SearchError::Transport {
                reason: format!("HTTP client setup failed: {e}"),
            })?;

        Ok(Self { client })
    }

    /// Wraps an already configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, SearchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::Transport {
                reason: format!("HTTP request failed: {}", e.without_url()),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Transport {
                reason: format!("HTTP status {status}"),
            });
        }

        response.json().await.map_err(|e| SearchError::Parse {
            reason: format!("JSON parsing failed: {}", e.without_url()),
        })
    }
}

/// Hides the `apikey` query value so URLs can be logged.
pub fn redact_api_key(url: &str) -> String {
    let Some(start) = url.find("apikey=").map(|i| i + "apikey=".len()) else {
        return url.to_string();
    };
    let end = url[start..]
        .find('&')
        .map_or(url.len(), |offset| start + offset);

    format!("{}***{}", &url[..start], &url[end..])
}
