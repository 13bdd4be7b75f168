//! Background worker for trend store operations.
//!
//! All trend store I/O runs on Zellij's worker thread so the UI loop never blocks on
//! the filesystem. The worker processes one message at a time.
//!
//! - `messages`: request/response protocol with trace context propagation
//! - `handler`: message processing against the [`TrendStore`](crate::storage::TrendStore)

pub mod handler;
pub mod messages;

pub use handler::PopcornWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
