//! Trending search domain model.
//!
//! A [`TrendRecord`] is the read snapshot of one search term's counter, as handed from
//! the worker to the UI thread. The authoritative state lives in the trend store; the
//! UI only ever holds these transient copies.

use serde::{Deserialize, Serialize};

/// One search term and how many successful searches it has produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendRecord {
    /// Search term exactly as typed (case-sensitive).
    pub search_term: String,

    /// Number of successful searches for this term, always at least 1.
    pub count: u64,

    /// Identifier of the first movie ever returned for this term.
    pub movie_id: i64,

    /// Title of the representative movie.
    pub title: String,

    /// Poster URL of the representative movie, if it had one.
    pub poster_url: Option<String>,
}

impl TrendRecord {
    /// Short label used by the trending strip: the term, or the movie title when the
    /// term is blank after trimming.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.search_term.trim().is_empty() {
            &self.title
        } else {
            &self.search_term
        }
    }
}
