//! Shared view of the movie store.

use reelscope_search::{MovieDetail, MovieSummary};
use serde::Serialize;

/// Snapshot of everything consumers render from.
///
/// `results` is `None` when no search has been made or nothing was found.
/// Entries are in API page order and may repeat across pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchState {
    pub results: Option<Vec<MovieSummary>>,
    pub selected: Option<MovieDetail>,
    /// True while at least one fetch is in flight.
    pub is_loading: bool,
    /// Page the current `results` end at, 1-based.
    pub current_page: u32,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            results: None,
            selected: None,
            is_loading: false,
            current_page: 1,
        }
    }
}

impl SearchState {
    /// Number of accumulated entries, zero when absent.
    pub fn result_count(&self) -> usize {
        self.results.as_ref().map_or(0, Vec::len)
    }

    /// Whether there is a non-empty list to show.
    pub fn has_results(&self) -> bool {
        self.result_count() > 0
    }
}

/// Identity of one request, taken when it is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Ticket {
    /// List page. Every page-1 request opens a new generation; later pages
    /// belong to the generation that was current when they were issued.
    List { generation: u64, page: u32 },
    /// Detail lookup, numbered in issue order.
    Detail(u64),
}

/// What has been applied so far, used to reject stale responses.
#[derive(Debug, Default)]
pub(crate) struct AppliedSequence {
    list_generation: u64,
    detail: u64,
}

impl AppliedSequence {
    /// Records `ticket` as applied unless it is stale.
    ///
    /// A page-1 response is stale only against a newer page 1. A later page
    /// applies only on top of the page 1 it was issued after.
    pub(crate) fn accept(&mut self, ticket: Ticket) -> bool {
        match ticket {
            Ticket::List { generation, page: 1 } => {
                if generation < self.list_generation {
                    return false;
                }
                self.list_generation = generation;
                true
            }
            Ticket::List { generation, .. } => generation == self.list_generation,
            Ticket::Detail(seq) => {
                if seq < self.detail {
                    return false;
                }
                self.detail = seq;
                true
            }
        }
    }
}
