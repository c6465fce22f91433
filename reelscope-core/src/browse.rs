//! Browse session: the search screen's use of the movie store.
//!
//! Holds the filter inputs and the infinite-scroll page counter, and turns
//! user actions (search, scroll to end, open a title) into store fetches.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use parking_lot::Mutex;
use reelscope_search::{MediaKind, MovieDetail, build_search_query};
use tracing::debug;

use crate::store::MovieStore;

/// Filter inputs of the search screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilters {
    pub query: String,
    /// Type filter value, `movie` unless changed.
    pub kind: String,
    pub year: String,
    pub genre: String,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            query: String::new(),
            kind: MediaKind::Movie.as_str().to_string(),
            year: String::new(),
            genre: String::new(),
        }
    }
}

impl SearchFilters {
    /// Search term for the current inputs, empty when nothing is set.
    pub fn search_term(&self) -> String {
        build_search_query(
            &self.query,
            Some(&self.kind),
            Some(&self.year),
            Some(&self.genre),
        )
    }
}

/// One user's browsing session over a shared store.
#[derive(Debug)]
pub struct BrowseSession {
    store: Arc<MovieStore>,
    filters: Mutex<SearchFilters>,
    page: AtomicU32,
    loading_more: AtomicBool,
}

impl BrowseSession {
    /// Creates a session with default filters on `store`.
    pub fn new(store: Arc<MovieStore>) -> Self {
        Self::with_filters(store, SearchFilters::default())
    }

    /// Creates a session with preset filters.
    pub fn with_filters(store: Arc<MovieStore>, filters: SearchFilters) -> Self {
        Self {
            store,
            filters: Mutex::new(filters),
            page: AtomicU32::new(1),
            loading_more: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &Arc<MovieStore> {
        &self.store
    }

    /// Copy of the current filter inputs.
    pub fn filters(&self) -> SearchFilters {
        self.filters.lock().clone()
    }

    pub fn set_query(&self, query: impl Into<String>) {
        self.filters.lock().query = query.into();
    }

    pub fn set_kind(&self, kind: impl Into<String>) {
        self.filters.lock().kind = kind.into();
    }

    pub fn set_year(&self, year: impl Into<String>) {
        self.filters.lock().year = year.into();
    }

    pub fn set_genre(&self, genre: impl Into<String>) {
        self.filters.lock().genre = genre.into();
    }

    /// Page the session will continue from.
    pub fn page(&self) -> u32 {
        self.page.load(Ordering::SeqCst)
    }

    /// Whether a load-more is currently running.
    pub fn is_loading_more(&self) -> bool {
        self.loading_more.load(Ordering::SeqCst)
    }

    /// Initial listing when the screen first appears.
    ///
    /// Fetches a random page only if there is nothing to show and no query.
    pub async fn start(&self) {
        let query_empty = self.filters.lock().query.is_empty();
        if self.store.snapshot().results.is_none() && query_empty {
            self.store.fetch_random(1).await;
        }
    }

    /// Runs a fresh search from page 1 with the current filters.
    pub async fn search(&self) {
        if self.store.snapshot().has_results() {
            self.store.clear_results();
        }
        self.page.store(1, Ordering::SeqCst);

        self.fetch_page(1).await;
    }

    /// Fetches the next page for infinite scrolling.
    ///
    /// Continues the random listing while the free-text query is empty,
    /// otherwise the filtered search. Returns false without fetching while another load-more is running.
    pub async fn load_more(&self) -> bool {
        if self.loading_more.swap(true, Ordering::SeqCst) {
            debug!("Load more already running");
            return false;
        }
        let _guard = LoadingMoreGuard(&self.loading_more);

        let next_page = self.page.fetch_add(1, Ordering::SeqCst) + 1;
        // the default type filter keeps the term non-empty, so key off the query
        let filters = self.filters();
        if filters.query.is_empty() {
            self.store.fetch_random(next_page).await;
        } else {
            self.store
                .fetch_by_search(&filters.search_term(), next_page)
                .await;
        }
        true
    }

    /// Loads the detail view for `imdb_id`.
    ///
    /// Returns the selection only if it is the requested title; anything
    /// else means the view is still loading or the lookup failed.
    pub async fn open(&self, imdb_id: &str) -> Option<MovieDetail> {
        self.store.fetch_by_imdb_id(imdb_id).await;
        self.store
            .snapshot()
            .selected
            .filter(|detail| detail.imdb_id == imdb_id)
    }

    async fn fetch_page(&self, page: u32) {
        let term = self.filters.lock().search_term();
        if term.is_empty() {
            self.store.fetch_random(page).await;
        } else {
            self.store.fetch_by_search(&term, page).await;
        }
    }
}

struct LoadingMoreGuard<'a>(&'a AtomicBool);

impl Drop for LoadingMoreGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
