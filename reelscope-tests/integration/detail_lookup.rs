//! Detail lookups by IMDb identifier.

use serde_json::json;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::{ids, search_page, store_for, upstream_error};

#[tokio::test]
async fn test_lookup_selects_full_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("i", "tt0133093"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Title": "The Matrix",
            "Year": "1999",
            "Rated": "R",
            "Runtime": "136 min",
            "Genre": "Action, Sci-Fi",
            "Director": "Lana Wachowski, Lilly Wachowski",
            "Actors": "Keanu Reeves, Laurence Fishburne, Carrie-Anne Moss",
            "Ratings": [
                { "Source": "Internet Movie Database", "Value": "8.7/10" },
                { "Source": "Rotten Tomatoes", "Value": "83%" }
            ],
            "imdbRating": "8.7",
            "imdbID": "tt0133093",
            "Type": "movie",
            "BoxOffice": "$172,076,928",
            "Response": "True"
        })))
        .mount(&server)
        .await;

    let store = store_for(&server);
    store.fetch_by_imdb_id("tt0133093").await;

    let detail = store.snapshot().selected.unwrap();
    assert_eq!(detail.title, "The Matrix");
    assert_eq!(detail.ratings.len(), 2);
    assert_eq!(detail.headline(), "1999 | Action, Sci-Fi | 136 min");
    assert_eq!(detail.imdb_url(), "https://www.imdb.com/title/tt0133093");
}

#[tokio::test]
async fn test_failed_lookup_keeps_list_and_selection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("s", "matrix"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_page(&[("The Matrix", "tt0133093")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("i", "tt9999999"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_error("Incorrect IMDb ID.")))
        .mount(&server)
        .await;

    let store = store_for(&server);
    store.fetch_by_search("matrix", 1).await;
    store.fetch_by_imdb_id("tt9999999").await;

    let state = store.snapshot();
    assert_eq!(ids(&store), ["tt0133093"]);
    assert!(state.selected.is_none());
    assert!(!state.is_loading);
}
