//! Transport failures are absorbed by the store.

use std::time::Duration;

use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::{ids, search_page, store_for, store_with_timeout};

#[tokio::test]
async fn test_server_error_leaves_previous_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(&[("Fun", "tt1")])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let store = store_for(&server);
    store.fetch_by_search("fun", 1).await;
    store.fetch_by_search("fun", 2).await;

    assert_eq!(ids(&store), ["tt1"]);
    assert!(!store.snapshot().is_loading);
}

#[tokio::test]
async fn test_non_json_body_is_swallowed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let store = store_for(&server);
    store.fetch_by_search("love", 1).await;

    assert!(store.snapshot().results.is_none());
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(search_page(&[("Late", "tt1")]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let store = store_with_timeout(&server, Duration::from_millis(200));

    tokio::time::timeout(Duration::from_secs(3), store.fetch_by_search("late", 1))
        .await
        .expect("request timeout must end the fetch");

    let state = store.snapshot();
    assert!(state.results.is_none());
    assert!(!state.is_loading);
}
