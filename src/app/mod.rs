//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the catalog, worker and UI layers.
//!
//! ```text
//! Keys / Timers / Web responses → Event → handle_event → state mutations → Actions
//!                                            ↑                               ↓
//!                                            └──────── Worker responses ─────┘
//! ```
//!
//! # Modules
//!
//! - [`debounce`]: raw query to settled query after a quiet interval
//! - [`fetch`]: generation-tagged fetch lifecycle and stale-response discard
//! - [`handler`]: event processing and state transition coordinator
//! - [`actions`]: side effects emitted by the handler
//! - [`modes`]: input mode types
//! - [`state`]: application state container and view model computation

pub mod actions;
pub mod debounce;
pub mod fetch;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use debounce::Debouncer;
pub use fetch::{FetchOrchestrator, Resolution, TrendHit};
pub use handler::{handle_event, Event};
pub use modes::{InputMode, SearchFocus};
pub use state::AppState;
