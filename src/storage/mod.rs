//! Storage layer for trending search counters.
//!
//! Persists one counter per distinct successful search term and produces the ranked
//! trending view. The store is only touched from the background worker.
//!
//! # Modules
//!
//! - `backend`: [`TrendStore`] trait (upsert-increment and ranked read)
//! - `json`: JSON file implementation
//! - `ranking`: count-descending, earliest-created-first ordering
//! - `models`: on-disk record type

pub mod backend;
pub mod json;
pub mod models;
pub mod ranking;

pub use backend::TrendStore;
pub use json::JsonTrendStore;
pub use models::TrendEntry;
pub use ranking::{sort_by_rank, top_n};
