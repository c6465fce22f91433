//! Search, scroll and random listing over HTTP.

use reelscope_core::{BrowseSession, SearchFilters};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::{API_KEY, ids, search_page, store_for, upstream_error};

#[tokio::test]
async fn test_filtered_search_sends_separate_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("apikey", API_KEY))
        .and(query_param("s", "batman"))
        .and(query_param("type", "movie"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(&[
            ("Batman Begins", "tt0372784"),
            ("The Batman", "tt1877830"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let session = BrowseSession::with_filters(
        store.clone(),
        SearchFilters {
            query: "batman".to_string(),
            ..Default::default()
        },
    );

    session.search().await;

    assert_eq!(ids(&store), ["tt0372784", "tt1877830"]);
    assert!(!store.snapshot().is_loading);
}

#[tokio::test]
async fn test_scrolling_appends_next_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("s", "star"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(search_page(&[("Star Wars", "tt0076759"), ("Star Trek", "tt0796366")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("s", "star"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_page(&[("Stardust", "tt0486655")])),
        )
        .mount(&server)
        .await;

    let store = store_for(&server);
    let session = BrowseSession::with_filters(
        store.clone(),
        SearchFilters {
            query: "star".to_string(),
            kind: String::new(),
            ..Default::default()
        },
    );

    session.search().await;
    session.load_more().await;

    assert_eq!(ids(&store), ["tt0076759", "tt0796366", "tt0486655"]);
    assert_eq!(store.snapshot().current_page, 2);
}

#[tokio::test]
async fn test_random_listing_retries_too_many_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_error("Too many results.")))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_page(&[("Moon", "tt1182345")])),
        )
        .mount(&server)
        .await;

    let store = store_for(&server);
    let session = BrowseSession::new(store.clone());

    session.start().await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
    assert_eq!(ids(&store), ["tt1182345"]);
}

#[tokio::test]
async fn test_search_without_matches_shows_empty_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_error("Movie not found!")))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let session = BrowseSession::new(store.clone());
    session.set_query("qqqzzzxx");

    session.search().await;

    let state = store.snapshot();
    assert!(state.results.is_none());
    assert!(!state.is_loading);
}
