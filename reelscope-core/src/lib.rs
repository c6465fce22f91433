//! Reelscope Core - Shared movie state for browsing clients
//!
//! This crate provides the session-wide movie store (result list, selected
//! title, loading flag), the browse session that maps screen actions onto
//! store fetches, configuration management and tracing setup.

pub mod browse;
pub mod config;
pub mod store;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use browse::{BrowseSession, SearchFilters};
pub use config::ReelscopeConfig;
pub use reelscope_search::SearchError;
pub use store::{MovieStore, SearchState};

/// Core errors that can bubble up from any Reelscope subsystem.
///
/// Store operations never return these; they surface while wiring a
/// session together.
#[derive(Debug, thiserror::Error)]
pub enum ReelscopeError {
    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReelscopeError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            ReelscopeError::Search(SearchError::Transport { .. }) => {
                "Could not reach the movie service".to_string()
            }
            ReelscopeError::Search(SearchError::Upstream(e)) => e.to_string(),
            ReelscopeError::Search(_) => "Unexpected response from the movie service".to_string(),
            ReelscopeError::Configuration { reason } => format!("Configuration error: {reason}"),
            ReelscopeError::Io(_) => "File system error occurred".to_string(),
        }
    }

    /// Checks if this error is due to user input validation.
    pub fn is_user_error(&self) -> bool {
        matches!(self, ReelscopeError::Configuration { .. })
    }
}

pub type Result<T> = std::result::Result<T, ReelscopeError>;
