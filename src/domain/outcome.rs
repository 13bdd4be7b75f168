//! Search outcome state.
//!
//! [`SearchOutcome`] is the single tagged state of the movie list: exactly one of
//! idle, loading, a successful result list, or an error message holds at any time.

use super::MovieSummary;

/// Current state of the movie search.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchOutcome {
    /// No request has been issued yet.
    #[default]
    Idle,

    /// A request is in flight and no newer outcome has been accepted.
    Loading,

    /// The latest request succeeded; the list may be empty.
    Success(Vec<MovieSummary>),

    /// The latest request failed; the message is safe to display.
    Error(String),
}

impl SearchOutcome {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Movies held by a successful outcome, empty for every other state.
    #[must_use]
    pub fn movies(&self) -> &[MovieSummary] {
        match self {
            Self::Success(movies) => movies,
            _ => &[],
        }
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}
