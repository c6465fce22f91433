//! Reelscope Search - OMDb search and lookup

#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Builds search terms from screen filters, issues requests against the OMDb
//! API and maps the raw JSON into movie summaries and detail records. Holds
//! no state of its own; see `reelscope-core` for the shared movie store.

pub mod client;
pub mod errors;
pub mod normalize;
pub mod omdb;
pub mod query;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_mocks;
pub mod types;

// Re-export main types
pub use client::{DEFAULT_REQUEST_TIMEOUT, HttpFetcher, JsonFetcher};
pub use errors::{SearchError, UpstreamError};
pub use normalize::{normalize, normalize_detail};
pub use omdb::{DEFAULT_BASE_URL, OmdbApi};
pub use query::build_search_query;
pub use types::{DetailSection, GENRE_OPTIONS, MediaKind, MovieDetail, MovieSummary, Rating};

/// Convenience type alias for Results with SearchError.
pub type Result<T> = std::result::Result<T, SearchError>;
