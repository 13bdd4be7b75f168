//! Movie summary domain model.
//!
//! [`MovieSummary`] is the catalog's description of a single movie as returned by the
//! discover and search endpoints. It is a transient value: received, displayed, and
//! possibly used as the representative movie of a trend record, but never persisted
//! on its own.

use serde::{Deserialize, Serialize};

/// Base URL for poster images, joined with a movie's `poster_path`.
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// A single movie returned by the catalog.
///
/// Field names follow the catalog's JSON. Unknown fields are ignored; optional display
/// fields default to `None` and `popularity` defaults to `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// Catalog-assigned unique identifier.
    pub id: i64,

    /// Display title.
    #[serde(default)]
    pub title: String,

    /// Relative poster path (e.g. `/abc123.jpg`).
    #[serde(default)]
    pub poster_path: Option<String>,

    /// Catalog popularity score.
    #[serde(default)]
    pub popularity: f64,

    /// Average user rating on a 0-10 scale.
    #[serde(default)]
    pub vote_average: Option<f64>,

    /// Release date as `YYYY-MM-DD`.
    #[serde(default)]
    pub release_date: Option<String>,

    /// ISO 639-1 code of the original language.
    #[serde(default)]
    pub original_language: Option<String>,
}

impl MovieSummary {
    /// Creates a movie summary with only the required fields set.
    #[must_use]
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: None,
            popularity: 0.0,
            vote_average: None,
            release_date: None,
            original_language: None,
        }
    }

    /// Full poster URL, if the movie has a poster.
    ///
    /// Empty poster paths are treated as absent.
    #[must_use]
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| format!("{POSTER_BASE_URL}{path}"))
    }

    /// Release year extracted from `release_date`.
    #[must_use]
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .filter(|year| year.chars().all(|c| c.is_ascii_digit()))
    }

    /// Rating formatted with one decimal, or `"N/A"` when the catalog has none.
    #[must_use]
    pub fn rating_label(&self) -> String {
        self.vote_average
            .filter(|v| *v > 0.0)
            .map_or_else(|| "N/A".to_string(), |v| format!("{v:.1}"))
    }
}
