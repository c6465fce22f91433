//! Scripted fetcher for tests that need a controllable API.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};

use crate::client::JsonFetcher;
use crate::errors::SearchError;

#[derive(Debug, Clone)]
enum Reply {
    Json(Value),
    Transport(String),
}

#[derive(Debug)]
struct Step {
    reply: Reply,
    delay: Duration,
}

/// Fetcher that answers from a queue of prepared replies.
///
/// Replies are taken in call order when the request starts, so a delayed
/// reply still belongs to the call that popped it. Once the queue is empty
/// the fallback reply (if any) answers every further call.
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    steps: Mutex<VecDeque<Step>>,
    fallback: Mutex<Option<Reply>>,
    urls: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    /// Creates a fetcher with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a JSON body.
    pub fn push_json(&self, body: Value) {
        self.push_json_delayed(body, Duration::ZERO);
    }

    /// Queues a JSON body delivered after `delay`.
    pub fn push_json_delayed(&self, body: Value, delay: Duration) {
        self.steps.lock().push_back(Step {
            reply: Reply::Json(body),
            delay,
        });
    }

    /// Queues a transport failure.
    pub fn push_transport_error(&self, reason: &str) {
        self.steps.lock().push_back(Step {
            reply: Reply::Transport(reason.to_string()),
            delay: Duration::ZERO,
        });
    }

    /// Answers every call past the end of the script with `body`.
    pub fn set_fallback_json(&self, body: Value) {
        *self.fallback.lock() = Some(Reply::Json(body));
    }

    /// URLs requested so far, in call order.
    pub fn requested_urls(&self) -> Vec<String> {
        self.urls.lock().clone()
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.urls.lock().len()
    }
}

#[async_trait]
impl JsonFetcher for ScriptedFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, SearchError> {
        self.urls.lock().push(url.to_string());

        let step = self.steps.lock().pop_front();
        let (reply, delay) = match step {
            Some(step) => (step.reply, step.delay),
            None => match self.fallback.lock().clone() {
                Some(reply) => (reply, Duration::ZERO),
                None => (Reply::Transport("script exhausted".to_string()), Duration::ZERO),
            },
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match reply {
            Reply::Json(body) => Ok(body),
            Reply::Transport(reason) => Err(SearchError::Transport { reason }),
        }
    }
}

/// Builds a successful search page from `(title, imdb_id)` pairs.
pub fn search_page(entries: &[(&str, &str)]) -> Value {
    let search: Vec<Value> = entries
        .iter()
        .map(|(title, id)| {
            json!({ "Title": title, "Year": "2000", "imdbID": id, "Type": "movie", "Poster": "N/A" })
        })
        .collect();

    json!({ "Search": search, "totalResults": entries.len().to_string(), "Response": "True" })
}

/// Builds an API rejection with the given `Error` text.
pub fn upstream_error(message: &str) -> Value {
    json!({ "Response": "False", "Error": message })
}

/// Builds a successful detail record.
pub fn detail_record(imdb_id: &str, title: &str) -> Value {
    json!({
        "Title": title,
        "Year": "1999",
        "Genre": "Action, Sci-Fi",
        "Runtime": "136 min",
        "imdbID": imdb_id,
        "Type": "movie",
        "Response": "True"
    })
}
