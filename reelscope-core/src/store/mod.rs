//! Movie store: the shared list/detail state and the fetch operations.
//!
//! One store exists per session and is handed to consumers by `Arc`. Every
//! fetch runs as an independent task; several may be in flight at once and
//! none is cancelled when another starts. Failures never leave the store:
//! they are logged and show up only as an unchanged or empty state.

pub mod state;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering as AtomicOrdering};

use parking_lot::Mutex;
use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_chacha::ChaCha8Rng;
use reelscope_search::{HttpFetcher, MovieSummary, OmdbApi, SearchError};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

pub use state::SearchState;
use state::{AppliedSequence, Ticket};

use crate::ReelscopeError;
use crate::config::{RANDOM_TERMS, ReelscopeConfig, StoreConfig};

/// Shared movie list, selected detail and loading flag.
pub struct MovieStore {
    api: OmdbApi,
    config: StoreConfig,
    state: watch::Sender<SearchState>,
    rng: Mutex<ChaCha8Rng>,
    in_flight: AtomicUsize,
    list_generation: AtomicU64,
    detail_issued: AtomicU64,
    applied: Mutex<AppliedSequence>,
}

impl std::fmt::Debug for MovieStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MovieStore")
            .field("api", &self.api)
            .field("config", &self.config)
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl MovieStore {
    /// Creates a store over `api` with the given fetch policy.
    pub fn new(api: OmdbApi, config: StoreConfig) -> Self {
        let rng = match config.random_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };

        Self {
            api,
            config,
            state: watch::Sender::new(SearchState::default()),
            rng: Mutex::new(rng),
            in_flight: AtomicUsize::new(0),
            list_generation: AtomicU64::new(0),
            detail_issued: AtomicU64::new(0),
            applied: Mutex::new(AppliedSequence::default()),
        }
    }

    /// Creates a store talking HTTP to the configured endpoint.
    ///
    /// # Errors
    /// - `ReelscopeError::Configuration` - Configuration failed validation
    /// - `ReelscopeError::Search` - HTTP client could not be built
    pub fn from_config(config: &ReelscopeConfig) -> Result<Self, ReelscopeError> {
        config.validate()?;

        let fetcher = HttpFetcher::new(config.api.request_timeout, config.api.user_agent)?;
        let api = OmdbApi::new(
            Arc::new(fetcher),
            config.api.base_url.clone(),
            config.api.api_key.clone(),
        );

        Ok(Self::new(api, config.store.clone()))
    }

    /// Current state.
    pub fn snapshot(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Fetch policy in use.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Resets the list to the absence marker ahead of a fresh search.
    pub fn clear_results(&self) {
        self.state.send_if_modified(|state| state.results.take().is_some());
    }

    /// Fetches one page of `term` and merges it into the list.
    ///
    /// Page 1 replaces the list, later pages append. When the API finds
    /// nothing, page 1 leaves the list absent and later pages keep what was
    /// already accumulated. Transport failures are logged and change nothing.
    pub async fn fetch_by_search(&self, term: &str, page: u32) {
        let page = page.max(1);
        let _loading = self.begin_loading();
        let ticket = self.list_ticket(page);

        match self.api.search(term, page).await {
            Ok(movies) => {
                info!(term, page, count = movies.len(), "Search page received");
                self.apply_page(ticket, page, movies);
            }
            Err(SearchError::Upstream(e)) => {
                warn!(term, page, "{e}");
                self.apply_not_found(ticket, page);
            }
            Err(e) => error!(term, page, "Search failed: {e}"),
        }
    }

    /// Fetches one page for a term sampled from the random vocabulary.
    ///
    /// A new term is drawn on every call, so consecutive pages may come from
    /// different terms. When the API answers "Too many results." another term
    /// is drawn for the same page, up to `max_random_attempts` times; after
    /// that the list falls back to the absence marker.
    pub async fn fetch_random(&self, page: u32) {
        let page = page.max(1);
        let _loading = self.begin_loading();
        let ticket = self.list_ticket(page);
        let attempts = self.config.max_random_attempts.max(1);

        for attempt in 1..=attempts {
            let term = self.sample_term();

            match self.api.search(&term, page).await {
                Ok(movies) => {
                    info!(term, page, count = movies.len(), "Random page received");
                    self.apply_page(ticket, page, movies);
                    return;
                }
                Err(SearchError::Upstream(e)) if e.is_too_many_results() => {
                    warn!(term, page, attempt, "Too many results, retrying with a different term");
                }
                Err(SearchError::Upstream(e)) => {
                    warn!(term, page, "{e}");
                    self.apply_not_found(ticket, page);
                    return;
                }
                Err(e) => {
                    error!(term, page, "Random search failed: {e}");
                    return;
                }
            }
        }

        warn!(page, attempts, "Random search gave up");
        self.apply(ticket, |state| {
            state.results = None;
            state.current_page = page;
        });
    }

    /// Fetches the full record for `imdb_id` and makes it the selection.
    ///
    /// A failed lookup leaves `selected` as it was. The list is untouched
    /// unless `clear_results_on_detail_failure` is set.
    pub async fn fetch_by_imdb_id(&self, imdb_id: &str) {
        let _loading = self.begin_loading();
        let ticket = Ticket::Detail(self.detail_issued.fetch_add(1, AtomicOrdering::SeqCst) + 1);

        match self.api.lookup(imdb_id).await {
            Ok(detail) => {
                info!(imdb_id, title = %detail.title, "Detail received");
                self.apply(ticket, |state| state.selected = Some(detail));
            }
            Err(e) => {
                match &e {
                    SearchError::Upstream(_) => warn!(imdb_id, "Lookup rejected: {e}"),
                    _ => error!(imdb_id, "Lookup failed: {e}"),
                }
                if self.config.clear_results_on_detail_failure {
                    self.clear_results();
                }
            }
        }
    }

    fn apply_page(&self, ticket: Ticket, page: u32, movies: Vec<MovieSummary>) {
        self.apply(ticket, |state| {
            if page == 1 {
                state.results = Some(movies);
            } else {
                state.results.get_or_insert_with(Vec::new).extend(movies);
            }
            state.current_page = page;
        });
    }

    fn apply_not_found(&self, ticket: Ticket, page: u32) {
        if page == 1 {
            self.apply(ticket, |state| {
                state.results = None;
                state.current_page = 1;
            });
        }
    }

    /// Applies `update` unless the response behind `ticket` is stale.
    fn apply(&self, ticket: Ticket, update: impl FnOnce(&mut SearchState)) {
        self.state.send_if_modified(|state| {
            if self.config.discard_stale_responses && !self.applied.lock().accept(ticket) {
                debug!(?ticket, "Discarding stale response");
                return false;
            }
            update(state);
            true
        });
    }

    /// Page 1 opens a new generation, later pages join the current one.
    fn list_ticket(&self, page: u32) -> Ticket {
        let generation = if page == 1 {
            self.list_generation.fetch_add(1, AtomicOrdering::SeqCst) + 1
        } else {
            self.list_generation.load(AtomicOrdering::SeqCst)
        };
        Ticket::List { generation, page }
    }

    fn sample_term(&self) -> String {
        let mut rng = self.rng.lock();
        self.config
            .random_terms
            .choose(&mut *rng)
            .cloned()
            .unwrap_or_else(|| RANDOM_TERMS[0].to_string())
    }

    fn begin_loading(&self) -> LoadingGuard<'_> {
        self.in_flight.fetch_add(1, AtomicOrdering::SeqCst);
        self.sync_loading_flag();
        LoadingGuard { store: self }
    }

    fn sync_loading_flag(&self) {
        self.state.send_if_modified(|state| {
            let loading = self.in_flight.load(AtomicOrdering::SeqCst) > 0;
            let changed = state.is_loading != loading;
            state.is_loading = loading;
            changed
        });
    }
}

/// Keeps `is_loading` raised for the lifetime of one fetch, even if the
/// fetch future is dropped midway.
struct LoadingGuard<'a> {
    store: &'a MovieStore,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.store.in_flight.fetch_sub(1, AtomicOrdering::SeqCst);
        self.store.sync_loading_flag();
    }
}

#[cfg(test)]
mod tests;
