//! Centralized configuration for Reelscope.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::time::Duration;

use reelscope_search::{DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT};

use crate::ReelscopeError;

/// Vocabulary sampled when no explicit search has been made.
pub const RANDOM_TERMS: &[&str] = &["love", "man", "matrix", "fun", "star", "moon", "avengers"];

/// Central configuration for all Reelscope components.
///
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct ReelscopeConfig {
    pub api: ApiConfig,
    pub store: StoreConfig,
}

/// Movie API endpoint and HTTP settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Endpoint that search and lookup parameters are appended to
    pub base_url: String,
    /// Static API key sent as `apikey`
    pub api_key: Option<String>,
    /// Bound on a single request
    pub request_timeout: Duration,
    /// User agent for HTTP requests
    pub user_agent: &'static str,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: "reelscope/0.1.0",
        }
    }
}

/// Movie store fetch and retry policy.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Terms sampled by random listings
    pub random_terms: Vec<String>,
    /// Attempts per random fetch before falling back to an empty list
    pub max_random_attempts: u32,
    /// Drop responses older than one already applied for the same operation
    pub discard_stale_responses: bool,
    /// Clear the result list when a detail lookup fails
    pub clear_results_on_detail_failure: bool,
    /// Seed for term sampling (None = seeded from the OS)
    pub random_seed: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            random_terms: RANDOM_TERMS.iter().map(|t| t.to_string()).collect(),
            max_random_attempts: 5,
            discard_stale_responses: true,
            clear_results_on_detail_failure: false,
            random_seed: None,
        }
    }
}

impl StoreConfig {
    /// Creates a store configuration for deterministic testing.
    pub fn deterministic_testing() -> Self {
        Self {
            random_seed: Some(42), // Fixed seed for reproducible tests
            ..Default::default()
        }
    }
}

impl ReelscopeConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Unparseable values are ignored and the default is kept.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(key) = std::env::var("OMDB_API_KEY")
            && !key.is_empty()
        {
            config.api.api_key = Some(key);
        }

        if let Ok(base_url) = std::env::var("REELSCOPE_BASE_URL") {
            config.api.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("REELSCOPE_REQUEST_TIMEOUT")
            && let Ok(seconds) = timeout.parse::<u64>()
        {
            config.api.request_timeout = Duration::from_secs(seconds);
        }

        if let Ok(attempts) = std::env::var("REELSCOPE_MAX_RANDOM_ATTEMPTS")
            && let Ok(count) = attempts.parse::<u32>()
        {
            config.store.max_random_attempts = count;
        }

        if let Ok(seed) = std::env::var("REELSCOPE_RANDOM_SEED")
            && let Ok(seed_value) = seed.parse::<u64>()
        {
            config.store.random_seed = Some(seed_value);
        }

        config
    }

    /// Creates a configuration optimized for testing.
    pub fn for_testing() -> Self {
        Self {
            api: ApiConfig {
                request_timeout: Duration::from_secs(2),
                ..Default::default()
            },
            store: StoreConfig::deterministic_testing(),
        }
    }

    /// Checks settings that would otherwise fail on first use.
    ///
    /// # Errors
    /// - `ReelscopeError::Configuration` - Invalid base URL, empty term
    ///   vocabulary or zero retry attempts
    pub fn validate(&self) -> Result<(), ReelscopeError> {
        url::Url::parse(&self.api.base_url).map_err(|e| ReelscopeError::Configuration {
            reason: format!("invalid base URL '{}': {e}", self.api.base_url),
        })?;

        if self.store.random_terms.is_empty() {
            return Err(ReelscopeError::Configuration {
                reason: "random term vocabulary is empty".to_string(),
            });
        }

        if self.store.max_random_attempts == 0 {
            return Err(ReelscopeError::Configuration {
                reason: "max_random_attempts must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = ReelscopeConfig::default();

        assert_eq!(config.api.base_url, "https://www.omdbapi.com/");
        assert_eq!(config.api.request_timeout, Duration::from_secs(10));
        assert_eq!(config.store.random_terms.len(), 7);
        assert_eq!(config.store.max_random_attempts, 5);
        assert!(config.store.discard_stale_responses);
        assert!(!config.store.clear_results_on_detail_failure);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_testing_preset_is_deterministic() {
        let config = ReelscopeConfig::for_testing();
        assert_eq!(config.store.random_seed, Some(42));
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let mut config = ReelscopeConfig::default();
        config.api.base_url = "not a url".to_string();
        assert!(matches!(
            config.validate(),
            Err(ReelscopeError::Configuration { .. })
        ));

        let mut config = ReelscopeConfig::default();
        config.store.max_random_attempts = 0;
        assert!(config.validate().is_err());

        let mut config = ReelscopeConfig::default();
        config.store.random_terms.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_override() {
        unsafe {
            std::env::set_var("REELSCOPE_REQUEST_TIMEOUT", "3");
            std::env::set_var("REELSCOPE_MAX_RANDOM_ATTEMPTS", "9");
            std::env::set_var("REELSCOPE_RANDOM_SEED", "12345");
            std::env::set_var("REELSCOPE_BASE_URL", "http://localhost:9000/");
        }

        let config = ReelscopeConfig::from_env();

        assert_eq!(config.api.request_timeout, Duration::from_secs(3));
        assert_eq!(config.store.max_random_attempts, 9);
        assert_eq!(config.store.random_seed, Some(12345));
        assert_eq!(config.api.base_url, "http://localhost:9000/");

        // Cleanup
        unsafe {
            std::env::remove_var("REELSCOPE_REQUEST_TIMEOUT");
            std::env::remove_var("REELSCOPE_MAX_RANDOM_ATTEMPTS");
            std::env::remove_var("REELSCOPE_RANDOM_SEED");
            std::env::remove_var("REELSCOPE_BASE_URL");
        }
    }
}
