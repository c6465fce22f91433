//! OMDb endpoint construction and typed calls.

use std::sync::Arc;

use tracing::debug;

use crate::client::{JsonFetcher, redact_api_key};
use crate::errors::SearchError;
use crate::normalize::{normalize, normalize_detail};
use crate::types::{MovieDetail, MovieSummary};

/// Public OMDb endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// OMDb API bound to one endpoint and key.
#[derive(Debug, Clone)]
pub struct OmdbApi {
    fetcher: Arc<dyn JsonFetcher>,
    base_url: String,
    api_key: Option<String>,
}

impl OmdbApi {
    /// Creates an API handle for `base_url` using `fetcher` for transport.
    pub fn new(
        fetcher: Arc<dyn JsonFetcher>,
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            api_key,
        }
    }

    /// URL of one page of a title search.
    ///
    /// The term is inserted verbatim so filter clauses produced by
    /// [`crate::build_search_query`] become their own query parameters.
    pub fn search_url(&self, term: &str, page: u32) -> String {
        format!("{}s={term}&page={page}", self.endpoint_prefix())
    }

    /// URL of a detail lookup by IMDb identifier.
    pub fn detail_url(&self, imdb_id: &str) -> String {
        format!("{}i={imdb_id}", self.endpoint_prefix())
    }

    /// Fetches one search page without interpreting it.
    ///
    /// # Errors
    /// - `SearchError::Transport` - Request failed
    /// - `SearchError::Parse` - Body was not JSON
    pub async fn search_raw(
        &self,
        term: &str,
        page: u32,
    ) -> Result<serde_json::Value, SearchError> {
        self.get(&self.search_url(term, page)).await
    }

    /// Fetches and normalizes one search page.
    ///
    /// # Errors
    /// - `SearchError::Transport` - Request failed
    /// - `SearchError::Parse` - Body was not JSON
    /// - `SearchError::Upstream` - API reported no results or too many
    pub async fn search(&self, term: &str, page: u32) -> Result<Vec<MovieSummary>, SearchError> {
        let raw = self.search_raw(term, page).await?;
        Ok(normalize(&raw)?)
    }

    /// Fetches the full record for `imdb_id`.
    ///
    /// # Errors
    /// - `SearchError::Transport` - Request failed
    /// - `SearchError::Parse` - Body was not a detail record
    /// - `SearchError::Upstream` - Identifier unknown or rejected
    pub async fn lookup(&self, imdb_id: &str) -> Result<MovieDetail, SearchError> {
        let raw = self.get(&self.detail_url(imdb_id)).await?;
        normalize_detail(&raw)
    }

    async fn get(&self, url: &str) -> Result<serde_json::Value, SearchError> {
        debug!(url = %redact_api_key(url), "GET");
        self.fetcher.fetch_json(url).await
    }

    fn endpoint_prefix(&self) -> String {
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        match &self.api_key {
            Some(key) => format!("{}{separator}apikey={key}&", self.base_url),
            None => format!("{}{separator}", self.base_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::errors::UpstreamError;
    use crate::test_mocks::ScriptedFetcher;

    fn api(fetcher: Arc<ScriptedFetcher>) -> OmdbApi {
        OmdbApi::new(fetcher, DEFAULT_BASE_URL, Some("k3y".to_string()))
    }

    #[test]
    fn test_endpoint_urls() {
        let api = api(Arc::new(ScriptedFetcher::new()));

        assert_eq!(
            api.search_url("batman&type=movie", 2),
            "https://www.omdbapi.com/?apikey=k3y&s=batman&type=movie&page=2"
        );
        assert_eq!(
            api.detail_url("tt0372784"),
            "https://www.omdbapi.com/?apikey=k3y&i=tt0372784"
        );
    }

    #[test]
    fn test_urls_without_key() {
        let api = OmdbApi::new(Arc::new(ScriptedFetcher::new()), "http://localhost:8080/", None);
        assert_eq!(api.search_url("fun", 1), "http://localhost:8080/?s=fun&page=1");

        let api = OmdbApi::new(Arc::new(ScriptedFetcher::new()), "http://h/?v=1", None);
        assert_eq!(api.detail_url("tt1"), "http://h/?v=1&i=tt1");
    }

    #[tokio::test]
    async fn test_search_normalizes_page() {
        let fetcher = Arc::new(ScriptedFetcher::new());
        fetcher.push_json(json!({
            "Response": "True",
            "Search": [{ "Title": "Fun", "Year": "2005", "imdbID": "tt01", "Type": "movie", "Poster": "N/A" }]
        }));

        let movies = api(fetcher.clone()).search("fun", 1).await.unwrap();

        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Fun");
        assert_eq!(fetcher.requested_urls().len(), 1);
    }

    #[tokio::test]
    async fn test_search_surfaces_upstream_error() {
        let fetcher = Arc::new(ScriptedFetcher::new());
        fetcher.push_json(json!({ "Response": "False", "Error": "Too many results." }));

        let error = api(fetcher).search("a", 1).await.unwrap_err();
        assert_eq!(error.upstream(), Some(&UpstreamError::TooManyResults));
    }

    #[tokio::test]
    async fn test_lookup_transport_failure() {
        let fetcher = Arc::new(ScriptedFetcher::new());
        fetcher.push_transport_error("connection refused");

        let error = api(fetcher).lookup("tt1").await.unwrap_err();
        assert!(matches!(error, SearchError::Transport { .. }));
    }
}
