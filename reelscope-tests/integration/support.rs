//! Shared fixtures for the integration tests.

use std::sync::Arc;
use std::time::Duration;

use reelscope_core::{MovieStore, ReelscopeConfig};
use serde_json::{Value, json};
use wiremock::MockServer;

pub const API_KEY: &str = "test-key";

/// Store pointed at `server` with a deterministic term sampler.
pub fn store_for(server: &MockServer) -> Arc<MovieStore> {
    store_with_timeout(server, Duration::from_secs(2))
}

pub fn store_with_timeout(server: &MockServer, timeout: Duration) -> Arc<MovieStore> {
    let mut config = ReelscopeConfig::for_testing();
    config.api.base_url = format!("{}/", server.uri());
    config.api.api_key = Some(API_KEY.to_string());
    config.api.request_timeout = timeout;

    Arc::new(MovieStore::from_config(&config).unwrap())
}

pub fn search_page(entries: &[(&str, &str)]) -> Value {
    let search: Vec<Value> = entries
        .iter()
        .map(|(title, id)| {
            json!({
                "Title": title,
                "Year": "2005",
                "imdbID": id,
                "Type": "movie",
                "Poster": "https://m.media-amazon.com/images/M/poster.jpg"
            })
        })
        .collect();

    json!({ "Search": search, "totalResults": "40", "Response": "True" })
}

pub fn upstream_error(message: &str) -> Value {
    json!({ "Response": "False", "Error": message })
}

pub fn ids(store: &MovieStore) -> Vec<String> {
    store
        .snapshot()
        .results
        .unwrap_or_default()
        .into_iter()
        .map(|m| m.imdb_id)
        .collect()
}
