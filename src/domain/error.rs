//! Error types for the PopcornPilot plugin.
//!
//! This module defines the centralized error type [`PopcornError`] and a type alias
//! [`Result`] used throughout the plugin. The first three variants form the search
//! error taxonomy (transport, logical, aggregation); the rest cover storage, I/O and
//! configuration failures of the surrounding plugin.

use thiserror::Error;

/// Generic message shown to the user for any catalog transport failure.
///
/// Raw transport details are logged, never displayed.
pub const GENERIC_FETCH_ERROR: &str = "Error fetching movies: Please try again later.";

/// Message shown when the catalog reports a logical failure without a message.
pub const DEFAULT_LOGICAL_ERROR: &str = "Error fetching movies";

/// The main error type for PopcornPilot operations.
#[derive(Debug, Error)]
pub enum PopcornError {
    /// The catalog gateway could not be reached or answered with a non-success status.
    ///
    /// Also used when a success response carries a body that cannot be decoded.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The catalog gateway answered but flagged the request as failed in its payload.
    ///
    /// Carries the message provided by the gateway (or the default message).
    #[error("{0}")]
    Logical(String),

    /// Recording a search or reading the trending view from the trend store failed.
    ///
    /// Never surfaces into the search outcome; it is logged and dropped.
    #[error("Aggregation error: {0}")]
    Aggregation(String),

    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PopcornError {
    /// Returns the message that may be shown to the user for this error.
    ///
    /// Logical failures keep the gateway's own message; every other variant collapses
    /// to [`GENERIC_FETCH_ERROR`].
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Logical(message) => message.clone(),
            _ => GENERIC_FETCH_ERROR.to_string(),
        }
    }
}

/// A specialized `Result` type for PopcornPilot operations.
pub type Result<T> = std::result::Result<T, PopcornError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_never_leak_raw_text() {
        let err = PopcornError::Transport("connection refused (os error 111)".to_string());
        assert_eq!(err.user_message(), GENERIC_FETCH_ERROR);
    }

    #[test]
    fn logical_errors_keep_gateway_message() {
        let err = PopcornError::Logical("No movies found".to_string());
        assert_eq!(err.user_message(), "No movies found");
        assert_eq!(err.to_string(), "No movies found");
    }
}
