//! Trend store abstraction.
//!
//! This module defines the [`TrendStore`] trait: a keyed upsert-with-increment plus a
//! ranked read. Any backend with an atomic create-or-increment operation satisfies it.
//! The worker owns the store and calls it from a single thread, so every
//! [`TrendStore::upsert_increment`] call is one indivisible step from the UI's point
//! of view.

use crate::domain::error::Result;
use crate::domain::MovieSummary;
use crate::storage::models::TrendEntry;

/// Abstraction over trend store backends.
///
/// # Implementations
///
/// - [`JsonTrendStore`](crate::storage::JsonTrendStore): JSON file with atomic writes
pub trait TrendStore: Send {
    /// Creates or increments the counter for `term`.
    ///
    /// A new term gets count 1 and its representative movie fields from `movie`. An
    /// existing term gets its count incremented by 1; its representative movie is left
    /// untouched (first seen wins). Returns the entry after the update.
    ///
    /// # Errors
    ///
    /// Returns an error if the update cannot be persisted.
    fn upsert_increment(&mut self, term: &str, movie: &MovieSummary) -> Result<TrendEntry>;

    /// Returns at most `limit` entries, ordered by count descending and then by
    /// creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn list_top_trending(&self, limit: usize) -> Result<Vec<TrendEntry>>;

    /// Looks up a single entry by its exact term.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn get(&self, term: &str) -> Result<Option<TrendEntry>>;
}
