//! Mapping of raw API responses into application types.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::{SearchError, UpstreamError};
use crate::types::{MovieDetail, MovieSummary};

/// Maps a raw search response onto result entries in page order.
///
/// Only a response whose `Response` field is the literal `"True"` yields
/// entries. Entries missing fields keep empty text; an entry that is not an
/// object becomes an empty summary rather than failing the page.
///
/// # Errors
/// - `UpstreamError` - `Response` was not `"True"`; classified from `Error`
pub fn normalize(raw: &Value) -> Result<Vec<MovieSummary>, UpstreamError> {
    ensure_found(raw)?;

    let Some(entries) = raw.get("Search").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    Ok(entries
        .iter()
        .map(|entry| {
            MovieSummary::deserialize(entry).unwrap_or_else(|e| {
                debug!("Malformed search entry, keeping empty summary: {e}");
                MovieSummary::default()
            })
        })
        .collect())
}

/// Decodes a raw `i=` lookup response into a detail record.
///
/// # Errors
/// - `SearchError::Upstream` - `Response` was not `"True"`
/// - `SearchError::Parse` - Record is not a JSON object
pub fn normalize_detail(raw: &Value) -> Result<MovieDetail, SearchError> {
    ensure_found(raw)?;

    MovieDetail::deserialize(raw).map_err(|e| SearchError::Parse {
        reason: format!("Invalid detail record: {e}"),
    })
}

fn ensure_found(raw: &Value) -> Result<(), UpstreamError> {
    if raw.get("Response").and_then(Value::as_str) == Some("True") {
        return Ok(());
    }

    Err(UpstreamError::from_message(
        raw.get("Error").and_then(Value::as_str),
    ))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::MediaKind;

    #[test]
    fn test_normalize_keeps_page_order() {
        let raw = json!({
            "Search": [
                { "Title": "Moon", "Year": "2009", "imdbID": "tt1182345", "Type": "movie", "Poster": "N/A" },
                { "Title": "Moon Knight", "Year": "2022", "imdbID": "tt10234724", "Type": "series", "Poster": "https://img/mk.jpg" }
            ],
            "totalResults": "2",
            "Response": "True"
        });

        let movies = normalize(&raw).unwrap();

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].imdb_id, "tt1182345");
        assert_eq!(movies[1].title, "Moon Knight");
        assert_eq!(movies[1].kind, MediaKind::Series);
        assert!(movies[1].has_poster());
    }

    #[test]
    fn test_normalize_missing_fields_are_empty() {
        let raw = json!({ "Response": "True", "Search": [ { "imdbID": "tt1" }, 42 ] });

        let movies = normalize(&raw).unwrap();

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].title, "");
        assert_eq!(movies[0].imdb_id, "tt1");
        assert_eq!(movies[1], MovieSummary::default());
    }

    #[test]
    fn test_normalize_false_response_is_absent() {
        let raw = json!({ "Response": "False", "Error": "Movie not found!" });
        assert_eq!(
            normalize(&raw),
            Err(UpstreamError::NotFound {
                message: "Movie not found!".to_string()
            })
        );

        let raw = json!({ "Response": "False", "Error": "Too many results." });
        assert_eq!(normalize(&raw), Err(UpstreamError::TooManyResults));
    }

    #[test]
    fn test_normalize_requires_literal_true() {
        assert!(normalize(&json!({ "Response": true, "Search": [] })).is_err());
        assert!(normalize(&json!({ "Search": [] })).is_err());
        assert!(normalize(&json!("True")).is_err());
    }

    #[test]
    fn test_normalize_detail() {
        let raw = json!({
            "Title": "Avengers: Endgame",
            "Year": "2019",
            "Director": "Anthony Russo, Joe Russo",
            "imdbID": "tt4154796",
            "Type": "movie",
            "Response": "True"
        });

        let detail = normalize_detail(&raw).unwrap();
        assert_eq!(detail.title, "Avengers: Endgame");
        assert_eq!(detail.director, "Anthony Russo, Joe Russo");
        assert_eq!(detail.kind, MediaKind::Movie);

        let missing = json!({ "Response": "False", "Error": "Incorrect IMDb ID." });
        let error = normalize_detail(&missing).unwrap_err();
        assert!(matches!(error.upstream(), Some(UpstreamError::Other { .. })));
    }
}
