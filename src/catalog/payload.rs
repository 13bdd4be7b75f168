//! Catalog response decoding.
//!
//! Turns the raw `(status, body)` pair of a catalog response into either a movie list
//! or a typed error. Transport failures (non-2xx status, undecodable body) and
//! logical failures (`"response": "False"` in a 2xx body) stay distinct so the caller
//! can pick the right user-facing message.

use crate::domain::error::{PopcornError, Result, DEFAULT_LOGICAL_ERROR};
use crate::domain::MovieSummary;
use serde::Deserialize;

/// Value of the `response` field that marks a logical failure.
const LOGICAL_FAILURE_FLAG: &str = "False";

/// Catalog response body.
///
/// Success bodies carry `results`; failure bodies carry `response: "False"` and an
/// optional `error`. Unknown fields (paging, totals) are ignored.
#[derive(Debug, Deserialize)]
struct CatalogPayload {
    #[serde(default)]
    results: Option<Vec<MovieSummary>>,

    #[serde(default)]
    response: Option<String>,

    #[serde(default)]
    error: Option<String>,
}

/// Decodes a catalog response.
///
/// # Errors
///
/// - [`PopcornError::Transport`] for a non-2xx status or a body that is not a valid
///   catalog payload
/// - [`PopcornError::Logical`] when the payload flags failure; carries the payload's
///   `error` text, or [`DEFAULT_LOGICAL_ERROR`] when absent or empty
pub fn decode_response(status: u16, body: &[u8]) -> Result<Vec<MovieSummary>> {
    if !(200..300).contains(&status) {
        return Err(PopcornError::Transport(format!(
            "catalog returned status {status}: {}",
            String::from_utf8_lossy(&body[..body.len().min(256)])
        )));
    }

    let payload: CatalogPayload = serde_json::from_slice(body)
        .map_err(|e| PopcornError::Transport(format!("invalid catalog body: {e}")))?;

    if payload.response.as_deref() == Some(LOGICAL_FAILURE_FLAG) {
        let message = payload
            .error
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_LOGICAL_ERROR.to_string());
        return Err(PopcornError::Logical(message));
    }

    Ok(payload.results.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::GENERIC_FETCH_ERROR;

    #[test]
    fn decodes_results() {
        let body = br#"{"page":1,"results":[{"id":1,"title":"Dune"},{"id":2,"title":"Dune: Part Two"}],"total_pages":1}"#;
        let movies = decode_response(200, body).unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].title, "Dune");
    }

    #[test]
    fn missing_results_is_empty_list() {
        assert!(decode_response(200, b"{}").unwrap().is_empty());
    }

    #[test]
    fn logical_failure_uses_payload_message() {
        let body = br#"{"response":"False","error":"No movies found"}"#;
        let err = decode_response(200, body).unwrap_err();
        assert!(matches!(err, PopcornError::Logical(ref m) if m == "No movies found"));
    }

    #[test]
    fn logical_failure_without_message_uses_default() {
        let err = decode_response(200, br#"{"response":"False"}"#).unwrap_err();
        assert_eq!(err.user_message(), DEFAULT_LOGICAL_ERROR);
    }

    #[test]
    fn non_success_status_is_transport_error() {
        let body = br#"{"status_code":7,"status_message":"Invalid API key"}"#;
        let err = decode_response(401, body).unwrap_err();
        assert!(matches!(err, PopcornError::Transport(_)));
        assert_eq!(err.user_message(), GENERIC_FETCH_ERROR);
    }

    #[test]
    fn garbage_body_is_transport_error() {
        let err = decode_response(200, b"<html>gateway timeout</html>").unwrap_err();
        assert!(matches!(err, PopcornError::Transport(_)));
    }
}
