use std::sync::Arc;
use std::time::Duration;

use reelscope_search::test_mocks::{ScriptedFetcher, detail_record, search_page, upstream_error};
use reelscope_search::{DEFAULT_BASE_URL, OmdbApi};

use super::*;
use crate::config::RANDOM_TERMS;

fn store_with(fetcher: &Arc<ScriptedFetcher>, config: StoreConfig) -> MovieStore {
    let api = OmdbApi::new(fetcher.clone(), DEFAULT_BASE_URL, Some("test".to_string()));
    MovieStore::new(api, config)
}

fn store(fetcher: &Arc<ScriptedFetcher>) -> MovieStore {
    store_with(fetcher, StoreConfig::deterministic_testing())
}

fn ids(state: &SearchState) -> Vec<String> {
    state
        .results
        .iter()
        .flatten()
        .map(|m| m.imdb_id.clone())
        .collect()
}

/// Extracts the `s=` value of a request URL up to the page parameter.
fn term_of(url: &str) -> &str {
    let start = url.find("&s=").map(|i| i + 3).unwrap();
    let end = url.rfind("&page=").unwrap();
    &url[start..end]
}

#[tokio::test]
async fn test_fresh_search_replaces_results() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.push_json(search_page(&[("Batman", "tt1"), ("Batman Returns", "tt2")]));
    fetcher.push_json(search_page(&[("Batman", "tt1"), ("Batman Returns", "tt2")]));
    let store = store(&fetcher);

    store.fetch_by_search("batman", 1).await;
    store.fetch_by_search("batman", 1).await;

    let state = store.snapshot();
    assert_eq!(ids(&state), ["tt1", "tt2"]);
    assert_eq!(state.current_page, 1);
    assert!(!state.is_loading);
}

#[tokio::test]
async fn test_next_page_appends_in_order() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.push_json(search_page(&[("Star Wars", "tt1"), ("Star Trek", "tt2")]));
    fetcher.push_json(search_page(&[("Stardust", "tt3"), ("A Star Is Born", "tt4")]));
    let store = store(&fetcher);

    store.fetch_by_search("star", 1).await;
    store.fetch_by_search("star", 2).await;

    let state = store.snapshot();
    assert_eq!(ids(&state), ["tt1", "tt2", "tt3", "tt4"]);
    assert_eq!(state.current_page, 2);
}

#[tokio::test]
async fn test_search_url_carries_filters_verbatim() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.push_json(search_page(&[("Batman Begins", "tt0372784")]));
    let store = store(&fetcher);

    store.fetch_by_search("batman&type=movie", 1).await;

    assert_eq!(
        fetcher.requested_urls(),
        ["https://www.omdbapi.com/?apikey=test&s=batman&type=movie&page=1"]
    );
}

#[tokio::test]
async fn test_not_found_on_first_page_is_absent() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.push_json(search_page(&[("Moon", "tt1")]));
    fetcher.push_json(upstream_error("Movie not found!"));
    let store = store(&fetcher);

    store.fetch_by_search("moon", 1).await;
    store.fetch_by_search("zzzzqx", 1).await;

    let state = store.snapshot();
    assert!(state.results.is_none());
    assert!(!state.is_loading);
}

#[tokio::test]
async fn test_not_found_past_last_page_keeps_list() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.push_json(search_page(&[("Moon", "tt1")]));
    fetcher.push_json(upstream_error("Movie not found!"));
    let store = store(&fetcher);

    store.fetch_by_search("moon", 1).await;
    store.fetch_by_search("moon", 2).await;

    let state = store.snapshot();
    assert_eq!(ids(&state), ["tt1"]);
    assert_eq!(state.current_page, 1);
}

#[tokio::test]
async fn test_too_many_results_search_is_not_retried() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.push_json(search_page(&[("A", "tt1")]));
    fetcher.push_json(upstream_error("Too many results."));
    fetcher.set_fallback_json(search_page(&[("Never", "tt9")]));
    let store = store(&fetcher);

    store.fetch_by_search("a", 1).await;
    store.fetch_by_search("e", 1).await;

    assert_eq!(fetcher.call_count(), 2);
    assert!(store.snapshot().results.is_none());
}

#[tokio::test]
async fn test_transport_failure_is_swallowed() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.push_json(search_page(&[("Fun", "tt1")]));
    fetcher.push_transport_error("connection reset");
    let store = store(&fetcher);

    store.fetch_by_search("fun", 1).await;
    store.fetch_by_search("fun", 2).await;

    let state = store.snapshot();
    assert_eq!(ids(&state), ["tt1"]);
    assert!(!state.is_loading);
}

#[tokio::test]
async fn test_random_draws_from_vocabulary_per_call() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.set_fallback_json(search_page(&[("Anything", "tt1")]));
    let store = store(&fetcher);

    for page in 1..=20 {
        store.fetch_random(page).await;
    }

    let urls = fetcher.requested_urls();
    let terms: std::collections::HashSet<&str> = urls.iter().map(|u| term_of(u)).collect();
    assert!(terms.iter().all(|t| RANDOM_TERMS.contains(t)));
    assert!(terms.len() > 1, "term must be re-sampled on every call");
    assert_eq!(store.snapshot().result_count(), 20);
}

#[tokio::test]
async fn test_random_retries_until_success() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    for _ in 0..3 {
        fetcher.push_json(upstream_error("Too many results."));
    }
    fetcher.push_json(search_page(&[("The Matrix", "tt0133093")]));
    let store = store(&fetcher);

    store.fetch_random(1).await;

    let urls = fetcher.requested_urls();
    assert_eq!(urls.len(), 4);
    assert!(urls.iter().all(|u| u.ends_with("&page=1")));
    assert_eq!(ids(&store.snapshot()), ["tt0133093"]);
}

#[tokio::test]
async fn test_random_retry_is_bounded() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.set_fallback_json(upstream_error("Too many results."));
    let config = StoreConfig {
        max_random_attempts: 3,
        ..StoreConfig::deterministic_testing()
    };
    let store = store_with(&fetcher, config);

    tokio::time::timeout(Duration::from_secs(5), store.fetch_random(1))
        .await
        .expect("bounded retry must terminate");

    let state = store.snapshot();
    assert_eq!(fetcher.call_count(), 3);
    assert!(state.results.is_none());
    assert!(!state.is_loading);
}

#[tokio::test]
async fn test_random_does_not_retry_other_errors() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.push_transport_error("timed out");
    fetcher.set_fallback_json(search_page(&[("Never", "tt9")]));
    let store = store(&fetcher);

    store.fetch_random(1).await;

    assert_eq!(fetcher.call_count(), 1);
    assert!(store.snapshot().results.is_none());
}

#[tokio::test]
async fn test_detail_lookup_replaces_selection() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.push_json(detail_record("tt0133093", "The Matrix"));
    fetcher.push_json(detail_record("tt0234215", "The Matrix Reloaded"));
    let store = store(&fetcher);

    store.fetch_by_imdb_id("tt0133093").await;
    store.fetch_by_imdb_id("tt0234215").await;

    let selected = store.snapshot().selected.unwrap();
    assert_eq!(selected.imdb_id, "tt0234215");
    assert_eq!(selected.title, "The Matrix Reloaded");
    assert_eq!(
        fetcher.requested_urls()[0],
        "https://www.omdbapi.com/?apikey=test&i=tt0133093"
    );
}

#[tokio::test]
async fn test_detail_failure_is_isolated_from_list() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.push_json(search_page(&[("Avengers", "tt1")]));
    fetcher.push_json(detail_record("tt1", "Avengers"));
    fetcher.push_json(upstream_error("Incorrect IMDb ID."));
    let store = store(&fetcher);

    store.fetch_by_search("avengers", 1).await;
    store.fetch_by_imdb_id("tt1").await;
    store.fetch_by_imdb_id("tt-missing").await;

    let state = store.snapshot();
    assert_eq!(ids(&state), ["tt1"]);
    assert_eq!(state.selected.unwrap().imdb_id, "tt1");
}

#[tokio::test]
async fn test_detail_failure_can_clear_list() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.push_json(search_page(&[("Avengers", "tt1")]));
    fetcher.push_json(detail_record("tt1", "Avengers"));
    fetcher.push_json(upstream_error("Incorrect IMDb ID."));
    let config = StoreConfig {
        clear_results_on_detail_failure: true,
        ..StoreConfig::deterministic_testing()
    };
    let store = store_with(&fetcher, config);

    store.fetch_by_search("avengers", 1).await;
    store.fetch_by_imdb_id("tt1").await;
    store.fetch_by_imdb_id("tt-missing").await;

    let state = store.snapshot();
    assert!(state.results.is_none());
    assert_eq!(state.selected.unwrap().imdb_id, "tt1");
}

#[tokio::test]
async fn test_list_page_keeps_selection() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.push_json(detail_record("tt0076759", "Star Wars"));
    fetcher.push_json(search_page(&[("Star Trek", "tt0079945")]));
    let store = store(&fetcher);

    store.fetch_by_imdb_id("tt0076759").await;
    store.fetch_by_search("star", 1).await;

    let state = store.snapshot();
    assert_eq!(ids(&state), ["tt0079945"]);
    assert_eq!(state.selected.unwrap().imdb_id, "tt0076759");
}

#[tokio::test]
async fn test_loading_flag_tracks_in_flight_fetch() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.push_json_delayed(search_page(&[("Love", "tt1")]), Duration::from_millis(50));
    let store = Arc::new(store(&fetcher));
    let mut updates = store.subscribe();

    let task = tokio::spawn({
        let store = store.clone();
        async move { store.fetch_by_search("love", 1).await }
    });

    updates.wait_for(|state| state.is_loading).await.unwrap();
    updates.wait_for(|state| !state.is_loading).await.unwrap();
    task.await.unwrap();

    assert_eq!(store.snapshot().result_count(), 1);
}

#[tokio::test]
async fn test_overlapping_fetches_keep_loading_until_last() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.push_json_delayed(search_page(&[("Slow", "tt1")]), Duration::from_millis(80));
    fetcher.push_json_delayed(detail_record("tt2", "Fast"), Duration::from_millis(10));
    let store = store(&fetcher);

    let slow = store.fetch_by_search("slow", 1);
    let fast = async {
        store.fetch_by_imdb_id("tt2").await;
        store.snapshot().is_loading
    };
    let ((), loading_after_fast) = tokio::join!(slow, fast);

    assert!(loading_after_fast);
    assert!(!store.snapshot().is_loading);
}

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.push_json_delayed(search_page(&[("Old", "tt-old")]), Duration::from_millis(80));
    fetcher.push_json_delayed(search_page(&[("New", "tt-new")]), Duration::from_millis(10));
    let store = store(&fetcher);

    tokio::join!(
        store.fetch_by_search("old", 1),
        store.fetch_by_search("new", 1)
    );

    assert_eq!(ids(&store.snapshot()), ["tt-new"]);
}

#[tokio::test]
async fn test_next_page_landing_before_first_page_keeps_first_page() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.push_json_delayed(
        search_page(&[("X-Men", "tt1"), ("X2", "tt2")]),
        Duration::from_millis(80),
    );
    fetcher.push_json_delayed(search_page(&[("X-Men: First Class", "tt3")]), Duration::from_millis(10));
    let store = store(&fetcher);

    tokio::join!(store.fetch_by_search("x", 1), store.fetch_by_search("x", 2));

    let state = store.snapshot();
    assert_eq!(ids(&state), ["tt1", "tt2"]);
    assert_eq!(state.current_page, 1);
}

#[tokio::test]
async fn test_next_page_of_replaced_search_is_dropped() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.push_json(search_page(&[("Alien", "tt1")]));
    fetcher.push_json_delayed(search_page(&[("Aliens", "tt2")]), Duration::from_millis(80));
    fetcher.push_json_delayed(search_page(&[("Heat", "tt3")]), Duration::from_millis(10));
    let store = store(&fetcher);

    store.fetch_by_search("alien", 1).await;
    tokio::join!(store.fetch_by_search("alien", 2), store.fetch_by_search("heat", 1));

    let state = store.snapshot();
    assert_eq!(ids(&state), ["tt3"]);
    assert_eq!(state.current_page, 1);
}

#[tokio::test]
async fn test_last_arrival_wins_without_sequencing() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.push_json_delayed(search_page(&[("Old", "tt-old")]), Duration::from_millis(80));
    fetcher.push_json_delayed(search_page(&[("New", "tt-new")]), Duration::from_millis(10));
    let config = StoreConfig {
        discard_stale_responses: false,
        ..StoreConfig::deterministic_testing()
    };
    let store = store_with(&fetcher, config);

    tokio::join!(
        store.fetch_by_search("old", 1),
        store.fetch_by_search("new", 1)
    );

    assert_eq!(ids(&store.snapshot()), ["tt-old"]);
}

#[tokio::test]
async fn test_clear_results() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.push_json(search_page(&[("Man", "tt1")]));
    let store = store(&fetcher);

    store.fetch_by_search("man", 1).await;
    store.clear_results();

    assert!(store.snapshot().results.is_none());
}
