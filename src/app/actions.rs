//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to the host directly. It returns a `Vec<Action>`
//! after each event and the runtime executes them in order: sending catalog requests,
//! arming debounce timers, and posting messages to the trend worker.

use crate::catalog::CatalogRequest;
use crate::worker::WorkerMessage;
use std::time::Duration;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Sends a catalog request; the response comes back as a catalog response event
    /// carrying the request's context.
    FetchCatalog(CatalogRequest),

    /// Arms a one-shot host timer that fires a timer event after `delay`.
    ScheduleTimer {
        /// Time until the timer fires.
        delay: Duration,
    },

    /// Posts a message to the background trend worker.
    PostToWorker(WorkerMessage),
}
