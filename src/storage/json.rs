//! JSON file-based trend store.
//!
//! Keeps every trend entry in memory and persists the whole set after each change
//! using atomic file writes (write-to-temp + rename), so the file is never left
//! half-written.
//!
//! # Performance Characteristics
//!
//! - **Read**: loads the file once on open
//! - **Write**: O(n), serializes the full entry set
//! - **Best for**: hundreds to a few thousand distinct search terms

use crate::domain::error::{PopcornError, Result};
use crate::domain::MovieSummary;
use crate::storage::backend::TrendStore;
use crate::storage::models::TrendEntry;
use crate::storage::ranking;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Current version of the on-disk format.
const STORE_VERSION: u32 = 1;

/// Top-level structure serialized to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreData {
    /// Format version for future migrations.
    version: u32,

    /// Next creation sequence to hand out.
    #[serde(default = "first_seq")]
    next_seq: u64,

    /// Entries keyed by exact search term.
    #[serde(default)]
    trends: HashMap<String, TrendEntry>,
}

const fn first_seq() -> u64 {
    1
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            next_seq: first_seq(),
            trends: HashMap::new(),
        }
    }
}

/// JSON file trend store.
///
/// # Thread Safety
///
/// `Send` but not `Sync`. Owned by the worker thread; concurrent writers to the same
/// file are not supported.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "next_seq": 3,
///   "trends": {
///     "dune": {
///       "search_term": "dune",
///       "count": 4,
///       "movie_id": 438631,
///       "title": "Dune",
///       "poster_url": "https://image.tmdb.org/t/p/w500/d5NX.jpg",
///       "created_seq": 1,
///       "created_at": 1760000000,
///       "updated_at": 1760000420
///     }
///   }
/// }
/// ```
pub struct JsonTrendStore {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory copy of the file, loaded on open and written back after each change.
    data: StoreData,
}

impl JsonTrendStore {
    /// Opens the store at `file_path`, creating parent directories as needed.
    ///
    /// A missing file yields an empty store; the file is written on the first update.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - The file exists but cannot be read
    /// - The file contains invalid JSON (reported as [`PopcornError::Storage`]; the
    ///   file is left untouched)
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use popcornpilot::storage::JsonTrendStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonTrendStore::open(PathBuf::from("/tmp/trending.json"))?;
    /// println!("{} terms tracked", store.len());
    /// # Ok::<(), popcornpilot::PopcornError>(())
    /// ```
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON trend store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no existing trend file, starting empty");
            StoreData::default()
        };

        tracing::debug!(trend_count = data.trends.len(), "trend store opened");

        Ok(Self { file_path, data })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Number of distinct search terms stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.trends.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.trends.is_empty()
    }

    /// Loads and validates the store file.
    ///
    /// Files edited by hand may carry a `next_seq` at or below an existing
    /// `created_seq`; it is moved past the largest one so new terms still rank after
    /// older ones on ties.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    fn load_from_file(path: &Path) -> Result<StoreData> {
        let contents = std::fs::read_to_string(path)?;
        let mut data: StoreData = serde_json::from_str(&contents)
            .map_err(|e| PopcornError::Storage(format!("failed to parse trend file: {e}")))?;

        // Repair the sequence if the file was edited by hand.
        let max_seq = data.trends.values().map(|e| e.created_seq).max().unwrap_or(0);
        if data.next_seq <= max_seq {
            tracing::warn!(next_seq = data.next_seq, max_seq, "trend sequence behind entries, repairing");
            data.next_seq = max_seq + 1;
        }

        tracing::debug!(version = data.version, trends = data.trends.len(), "loaded trend data");
        Ok(data)
    }

    /// Writes the full data set to a temporary file, then renames it into place.
    ///
    /// The rename replaces the old file in one step, so readers see either the old
    /// or the new contents.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - JSON serialization fails
    /// - The temporary file cannot be written
    /// - The rename fails
    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| PopcornError::Storage(format!("failed to serialize trends: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::trace!(path = ?self.file_path, "trend store saved");
        Ok(())
    }
}

impl TrendStore for JsonTrendStore {
    /// Increments `term`, creating it from `movie` on first sight.
    ///
    /// The file is rewritten before returning. If the write fails the in-memory
    /// state is rolled back, so a retry does not count twice.
    fn upsert_increment(&mut self, term: &str, movie: &MovieSummary) -> Result<TrendEntry> {
        let _span = tracing::debug_span!("json_upsert_increment", term = %term, movie_id = movie.id).entered();

        let now = chrono::Utc::now().timestamp();
        let previous = self.data.clone();

        let entry = if let Some(existing) = self.data.trends.get_mut(term) {
            existing.count = existing.count.saturating_add(1);
            existing.updated_at = now;
            existing.clone()
        } else {
            let seq = self.data.next_seq;
            self.data.next_seq += 1;
            let entry = TrendEntry::first_search(term, movie, seq, now);
            self.data.trends.insert(term.to_string(), entry.clone());
            entry
        };

        if let Err(e) = self.save() {
            // Keep memory consistent with the file when the write fails.
            self.data = previous;
            return Err(e);
        }

        tracing::debug!(count = entry.count, "trend counter updated");
        Ok(entry)
    }

    /// Ranks every stored term and returns the first `limit`.
    fn list_top_trending(&self, limit: usize) -> Result<Vec<TrendEntry>> {
        let _span = tracing::debug_span!("json_list_top_trending", limit).entered();

        let top = ranking::top_n(self.data.trends.values(), limit);

        tracing::debug!(returned = top.len(), total = self.data.trends.len(), "trending view computed");
        Ok(top)
    }

    fn get(&self, term: &str) -> Result<Option<TrendEntry>> {
        Ok(self.data.trends.get(term).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i64, title: &str, poster: Option<&str>) -> MovieSummary {
        let mut movie = MovieSummary::new(id, title);
        movie.poster_path = poster.map(ToString::to_string);
        movie
    }

    fn open_temp() -> (tempfile::TempDir, JsonTrendStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonTrendStore::open(dir.path().join("nested").join("trending.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn first_search_creates_record_with_count_one() {
        let (_dir, mut store) = open_temp();

        let entry = store.upsert_increment("dune", &movie(1, "Dune", Some("/a.jpg"))).unwrap();

        assert_eq!(entry.count, 1);
        assert_eq!(entry.movie_id, 1);
        assert_eq!(entry.poster_url.as_deref(), Some("https://image.tmdb.org/t/p/w500/a.jpg"));
    }

    #[test]
    fn repeat_search_increments_and_keeps_first_movie() {
        let (_dir, mut store) = open_temp();

        store.upsert_increment("dune", &movie(1, "Dune", Some("/a.jpg"))).unwrap();
        let entry = store.upsert_increment("dune", &movie(2, "Dune: Part Two", Some("/b.jpg"))).unwrap();

        assert_eq!(entry.count, 2);
        assert_eq!(entry.movie_id, 1);
        assert_eq!(entry.title, "Dune");
        assert_eq!(entry.poster_url.as_deref(), Some("https://image.tmdb.org/t/p/w500/a.jpg"));
    }

    #[test]
    fn terms_are_case_sensitive() {
        let (_dir, mut store) = open_temp();

        store.upsert_increment("Dune", &movie(1, "Dune", None)).unwrap();
        store.upsert_increment("dune", &movie(1, "Dune", None)).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("Dune").unwrap().unwrap().count, 1);
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trending.json");

        {
            let mut store = JsonTrendStore::open(path.clone()).unwrap();
            store.upsert_increment("alien", &movie(10, "Alien", None)).unwrap();
            store.upsert_increment("alien", &movie(11, "Aliens", None)).unwrap();
            store.upsert_increment("heat", &movie(20, "Heat", None)).unwrap();
        }

        let mut store = JsonTrendStore::open(path).unwrap();
        assert_eq!(store.get("alien").unwrap().unwrap().count, 2);

        // New terms keep getting later sequence numbers after reopen.
        let heat_seq = store.get("heat").unwrap().unwrap().created_seq;
        let new_entry = store.upsert_increment("ran", &movie(30, "Ran", None)).unwrap();
        assert!(new_entry.created_seq > heat_seq);
    }

    #[test]
    fn list_top_trending_ranks_and_limits() {
        let (_dir, mut store) = open_temp();

        for (term, times) in [("a", 1), ("b", 3), ("c", 2), ("d", 3), ("e", 1), ("f", 1)] {
            for _ in 0..times {
                store.upsert_increment(term, &movie(1, term, None)).unwrap();
            }
        }

        let top: Vec<(String, u64)> = store
            .list_top_trending(4)
            .unwrap()
            .into_iter()
            .map(|e| (e.search_term, e.count))
            .collect();

        assert_eq!(
            top,
            vec![
                ("b".to_string(), 3),
                ("d".to_string(), 3),
                ("c".to_string(), 2),
                ("a".to_string(), 1),
            ]
        );
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trending.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonTrendStore::open(path).err().unwrap();
        assert!(matches!(err, PopcornError::Storage(_)));
    }
}
