//! Error types for OMDb search and lookup.

use thiserror::Error;

/// Errors that can occur while talking to the movie API.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Network failure, timeout or non-2xx status.
    #[error("Transport error: {reason}")]
    Transport {
        /// The reason for the transport failure
        reason: String,
    },

    /// Response body was not the JSON shape we expected.
    #[error("Parse error: {reason}")]
    Parse {
        /// The reason for the parse error
        reason: String,
    },

    /// API answered with `Response: "False"`.
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),
}

impl SearchError {
    /// Returns the upstream error if the API itself rejected the request.
    pub fn upstream(&self) -> Option<&UpstreamError> {
        match self {
            SearchError::Upstream(e) => Some(e),
            _ => None,
        }
    }
}

/// Terminal errors reported by the API in its `Error` field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// Query was too broad for the API to page through.
    #[error("Too many results.")]
    TooManyResults,

    /// Nothing matched the query or identifier.
    #[error("{message}")]
    NotFound {
        /// Message as reported by the API
        message: String,
    },

    /// Any other rejection, e.g. an invalid API key.
    #[error("{message}")]
    Other {
        /// Message as reported by the API
        message: String,
    },
}

impl UpstreamError {
    /// Classifies the text of an OMDb `Error` field.
    ///
    /// A missing message is treated as "no movies found".
    pub fn from_message(message: Option<&str>) -> Self {
        match message {
            Some("Too many results.") => UpstreamError::TooManyResults,
            Some(m) if m.contains("not found") => UpstreamError::NotFound {
                message: m.to_string(),
            },
            Some(m) => UpstreamError::Other {
                message: m.to_string(),
            },
            None => UpstreamError::NotFound {
                message: "No movies found.".to_string(),
            },
        }
    }

    /// True for the error that makes random sampling draw a new term.
    pub fn is_too_many_results(&self) -> bool {
        matches!(self, UpstreamError::TooManyResults)
    }
}
