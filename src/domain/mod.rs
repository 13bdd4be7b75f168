//! Domain layer for the PopcornPilot plugin.
//!
//! Core types shared by every other layer, independent of Zellij APIs and of the
//! storage backend.
//!
//! # Organization
//!
//! - [`error`]: Error taxonomy and result alias
//! - [`movie`]: Catalog movie summary
//! - [`outcome`]: Search outcome state
//! - [`trend`]: Trending search snapshot

pub mod error;
pub mod movie;
pub mod outcome;
pub mod trend;

pub use error::{PopcornError, Result};
pub use movie::MovieSummary;
pub use outcome::SearchOutcome;
pub use trend::TrendRecord;
