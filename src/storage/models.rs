//! Storage record models for the trend store.
//!
//! These types are the on-disk representation of trend counters. They are kept
//! separate from [`crate::domain::TrendRecord`] so the file can carry bookkeeping
//! fields (creation sequence, timestamps) the UI never needs.

use crate::domain::{MovieSummary, TrendRecord};
use serde::{Deserialize, Serialize};

/// A trend counter as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendEntry {
    /// Search term exactly as typed. Unique key of the store.
    pub search_term: String,

    /// Number of successful searches, at least 1.
    pub count: u64,

    /// Identifier of the first movie returned for this term.
    pub movie_id: i64,

    /// Title of the first movie returned for this term.
    #[serde(default)]
    pub title: String,

    /// Poster URL of the first movie returned for this term.
    pub poster_url: Option<String>,

    /// Store-assigned creation sequence, strictly increasing across entries.
    ///
    /// Used to break ties between equal counts (earliest created first).
    pub created_seq: u64,

    /// Unix timestamp of creation.
    pub created_at: i64,

    /// Unix timestamp of the most recent increment.
    pub updated_at: i64,
}

impl TrendEntry {
    /// Creates the first entry for `term`, taking the representative fields from `movie`.
    ///
    /// The count starts at 1.
    #[must_use]
    pub fn first_search(term: &str, movie: &MovieSummary, created_seq: u64, now: i64) -> Self {
        Self {
            search_term: term.to_string(),
            count: 1,
            movie_id: movie.id,
            title: movie.title.clone(),
            poster_url: movie.poster_url(),
            created_seq,
            created_at: now,
            updated_at: now,
        }
    }

    /// Converts the entry into the snapshot handed to the UI thread.
    #[must_use]
    pub fn to_record(&self) -> TrendRecord {
        TrendRecord {
            search_term: self.search_term.clone(),
            count: self.count,
            movie_id: self.movie_id,
            title: self.title.clone(),
            poster_url: self.poster_url.clone(),
        }
    }
}
