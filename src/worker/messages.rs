//! Worker thread message types for cross-thread communication.
//!
//! Requests and responses between the UI thread and the trend worker travel as JSON
//! strings over Zellij's plugin messaging. Each request carries an optional
//! [`TraceContext`] so spans opened in the worker join the UI thread's trace.

use crate::domain::{MovieSummary, TrendRecord};
use serde::{Deserialize, Serialize};

/// Trace and parent span identifiers captured on the sending thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as 32 hex characters.
    pub trace_id: String,

    /// Parent span ID as 16 hex characters.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the context of the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span context is
    /// not valid.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();
        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates `WorkerMessage` constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    record_search(RecordSearch { term: String, movie: MovieSummary }),
    load_trending(LoadTrending { limit: usize }),
}

/// Messages sent from the UI thread to the worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Upsert-increment the counter for `term`, using `movie` as the representative
    /// movie if the term is new.
    RecordSearch {
        /// Settled query, case-sensitive.
        term: String,

        /// First movie of the accepted result list.
        movie: MovieSummary,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Read the top `limit` trend records.
    LoadTrending {
        limit: usize,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Trace context attached to the message, if any.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::RecordSearch { trace_context, .. } | Self::LoadTrending { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }
}

/// Responses sent from the worker back to the UI thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// A search was counted.
    SearchRecorded {
        term: String,

        /// Count after the increment.
        count: u64,
    },

    /// The ranked trending view.
    TrendingLoaded {
        /// At most the requested number of records, best first.
        records: Vec<TrendRecord>,
    },

    /// The trend store operation failed.
    Error {
        /// Human-readable error message, for logs only.
        message: String,
    },
}
