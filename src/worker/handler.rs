//! Trend worker: the Trending Aggregator's side of the plugin.
//!
//! Runs on the Zellij worker thread and owns the [`TrendStore`]. Messages are handled
//! one at a time, so each upsert-increment is atomic with respect to every other
//! store operation. Store failures become [`WorkerResponse::Error`]; they never reach
//! the search outcome.
//!
//! This type is host-independent: the plugin binary wraps it in a `ZellijWorker` that
//! moves JSON payloads in and out via [`PopcornWorker::handle_payload`].

use crate::domain::error::{PopcornError, Result};
use crate::domain::MovieSummary;
use crate::infrastructure::paths;
use crate::storage::{JsonTrendStore, TrendStore};
use crate::worker::{WorkerMessage, WorkerResponse};
use std::path::PathBuf;

/// Worker state: the trend store and where to open it from.
///
/// The store is opened lazily on the first message so a missing or unreadable file
/// only affects trend operations.
pub struct PopcornWorker {
    store: Option<Box<dyn TrendStore>>,
    store_path: PathBuf,
}

impl PopcornWorker {
    /// Worker that opens the JSON store at `store_path` on first use.
    #[must_use]
    pub fn at_path(store_path: PathBuf) -> Self {
        Self {
            store: None,
            store_path,
        }
    }

    /// Worker backed by an already opened store.
    #[must_use]
    pub fn with_store(store: Box<dyn TrendStore>) -> Self {
        Self {
            store: Some(store),
            store_path: paths::trend_store_path(),
        }
    }

    /// Returns the store, opening it first if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON store cannot be opened.
    fn store(&mut self) -> Result<&mut Box<dyn TrendStore>> {
        if self.store.is_none() {
            let store = JsonTrendStore::open(self.store_path.clone())?;
            self.store = Some(Box::new(store));
        }
        self.store
            .as_mut()
            .ok_or_else(|| PopcornError::Worker("trend store not initialized".to_string()))
    }

    /// Converts a store result into a response, logging failures at `warn`.
    fn respond<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation, "trend store operation successful");
                on_success(value)
            }
            Err(e) => {
                let error = PopcornError::Aggregation(format!("{operation}: {e}"));
                tracing::warn!(operation, error = %error, "trend store operation failed");
                WorkerResponse::Error {
                    message: error.to_string(),
                }
            }
        }
    }

    fn handle_record_search(&mut self, term: &str, movie: &MovieSummary) -> WorkerResponse {
        Self::respond(
            "record search",
            self.store().and_then(|store| store.upsert_increment(term, movie)),
            |entry| {
                tracing::debug!(term = %entry.search_term, count = entry.count, "search recorded");
                WorkerResponse::SearchRecorded {
                    term: entry.search_term,
                    count: entry.count,
                }
            },
        )
    }

    fn handle_load_trending(&mut self, limit: usize) -> WorkerResponse {
        Self::respond(
            "load trending",
            self.store().and_then(|store| store.list_top_trending(limit)),
            |entries| {
                tracing::debug!(limit, record_count = entries.len(), "trending view loaded");
                WorkerResponse::TrendingLoaded {
                    records: entries.iter().map(|entry| entry.to_record()).collect(),
                }
            },
        )
    }

    /// Re-attaches the sender's trace context so worker spans join its trace.
    ///
    /// The returned guard must be held while the message is handled.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes one message and returns the response to send back.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::RecordSearch { term, movie, .. } => self.handle_record_search(&term, &movie),
            WorkerMessage::LoadTrending { limit, .. } => self.handle_load_trending(limit),
        }
    }

    /// JSON entry point used by the host bridge.
    ///
    /// Returns the serialized response, or `None` when the payload is not a valid
    /// message or the response cannot be serialized (both logged).
    pub fn handle_payload(&mut self, payload: &str) -> Option<String> {
        let message: WorkerMessage = match serde_json::from_str(payload) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker message");
                return None;
            }
        };

        let response = self.handle_message(message);

        serde_json::to_string(&response)
            .map_err(|e| tracing::warn!(error = %e, "failed to serialize worker response"))
            .ok()
    }
}

impl Default for PopcornWorker {
    fn default() -> Self {
        Self::at_path(paths::trend_store_path())
    }
}
