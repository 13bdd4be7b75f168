//! Fetch lifecycle for settled queries.
//!
//! [`FetchOrchestrator`] owns the [`SearchOutcome`] state machine. Every settle event
//! issues exactly one catalog request tagged with a fresh generation token and moves
//! the outcome to `Loading`. Responses are accepted only when they carry the latest
//! token; anything older is dropped without touching state, so a slow early response
//! can never overwrite a faster later one.
//!
//! ```text
//!            settle                       accept(latest, Ok)
//!   Idle ───────────► Loading ───────────────────────────────► Success(movies)
//!                      ▲   │  accept(latest, Err)
//!         settle (any) │   └───────────────────────────────► Error(message)
//!                      └──────── from any state
//! ```

use crate::catalog::{decode_response, CatalogGateway, CatalogRequest, FetchMode};
use crate::domain::error::Result;
use crate::domain::{MovieSummary, SearchOutcome};

/// A successful non-empty search that should be counted as trending.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendHit {
    /// The settled query that produced the results.
    pub term: String,

    /// First movie of the result list.
    pub movie: MovieSummary,
}

/// What happened to a response handed to the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The response belonged to a superseded request and was dropped.
    Discarded,

    /// The latest request failed; the outcome is now `Error`.
    Failed,

    /// The latest request succeeded; the outcome is now `Success`.
    Succeeded {
        /// Search to record in the trending store, if any.
        trend_hit: Option<TrendHit>,
    },
}

/// State machine over [`SearchOutcome`] driven by settle events and responses.
#[derive(Debug, Clone)]
pub struct FetchOrchestrator {
    gateway: CatalogGateway,
    outcome: SearchOutcome,
    /// Generation of the most recently issued request, 0 before the first.
    latest_generation: u64,
    /// Settled query of the most recently issued request.
    latest_query: String,
}

impl FetchOrchestrator {
    #[must_use]
    pub fn new(gateway: CatalogGateway) -> Self {
        Self {
            gateway,
            outcome: SearchOutcome::Idle,
            latest_generation: 0,
            latest_query: String::new(),
        }
    }

    #[must_use]
    pub const fn outcome(&self) -> &SearchOutcome {
        &self.outcome
    }

    #[must_use]
    pub const fn latest_generation(&self) -> u64 {
        self.latest_generation
    }

    /// Query of the request whose response is awaited (or was last accepted).
    #[must_use]
    pub fn latest_query(&self) -> &str {
        &self.latest_query
    }

    #[must_use]
    pub const fn gateway(&self) -> &CatalogGateway {
        &self.gateway
    }

    /// Handles a settle event: enters `Loading` and returns the one request to send.
    ///
    /// An empty query selects the discover request, anything else a term search.
    pub fn issue(&mut self, settled: &str) -> CatalogRequest {
        self.latest_generation += 1;
        self.latest_query = settled.to_string();
        self.outcome = SearchOutcome::Loading;

        let request = self
            .gateway
            .build(FetchMode::for_query(settled), self.latest_generation);

        tracing::debug!(
            generation = self.latest_generation,
            discover = request.mode.is_discover(),
            "catalog request issued"
        );
        request
    }

    /// Handles a raw catalog response for `generation`.
    ///
    /// Stale responses are discarded before their body is even decoded.
    pub fn on_response(&mut self, generation: u64, status: u16, body: &[u8]) -> Resolution {
        if generation != self.latest_generation {
            tracing::debug!(
                generation,
                latest = self.latest_generation,
                status,
                "discarding stale catalog response"
            );
            return Resolution::Discarded;
        }

        self.accept(generation, decode_response(status, body))
    }

    /// Applies a decoded result for `generation` under the latest-generation rule.
    pub fn accept(&mut self, generation: u64, result: Result<Vec<MovieSummary>>) -> Resolution {
        if generation != self.latest_generation {
            tracing::debug!(generation, latest = self.latest_generation, "discarding stale catalog result");
            return Resolution::Discarded;
        }

        match result {
            Ok(movies) => {
                tracing::debug!(generation, movie_count = movies.len(), "catalog results accepted");

                let trend_hit = if self.latest_query.is_empty() {
                    None
                } else {
                    movies.first().map(|movie| TrendHit {
                        term: self.latest_query.clone(),
                        movie: movie.clone(),
                    })
                };

                self.outcome = SearchOutcome::Success(movies);
                Resolution::Succeeded { trend_hit }
            }
            Err(e) => {
                tracing::warn!(generation, error = %e, "catalog request failed");
                self.outcome = SearchOutcome::Error(e.user_message());
                Resolution::Failed
            }
        }
    }
}

impl Default for FetchOrchestrator {
    fn default() -> Self {
        Self::new(CatalogGateway::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::{PopcornError, GENERIC_FETCH_ERROR};

    fn movies(ids: &[i64]) -> Vec<MovieSummary> {
        ids.iter().map(|id| MovieSummary::new(*id, format!("movie {id}"))).collect()
    }

    #[test]
    fn settle_enters_loading_and_issues_one_request() {
        let mut fetch = FetchOrchestrator::default();
        assert_eq!(fetch.outcome(), &SearchOutcome::Idle);

        let request = fetch.issue("");
        assert!(request.mode.is_discover());
        assert_eq!(request.generation, 1);
        assert!(fetch.outcome().is_loading());
    }

    #[test]
    fn late_response_from_superseded_request_is_discarded() {
        let mut fetch = FetchOrchestrator::default();
        let a = fetch.issue("dun");
        let b = fetch.issue("dune");

        let resolution = fetch.accept(b.generation, Ok(movies(&[1])));
        assert!(matches!(resolution, Resolution::Succeeded { .. }));
        let accepted = fetch.outcome().clone();

        assert_eq!(fetch.accept(a.generation, Ok(movies(&[9, 8]))), Resolution::Discarded);
        assert_eq!(fetch.outcome(), &accepted);
    }

    #[test]
    fn discarded_response_keeps_loading() {
        let mut fetch = FetchOrchestrator::default();
        let a = fetch.issue("a");
        let _b = fetch.issue("ab");

        assert_eq!(
            fetch.accept(a.generation, Err(PopcornError::Transport("boom".into()))),
            Resolution::Discarded
        );
        assert!(fetch.outcome().is_loading());
    }

    #[test]
    fn non_empty_success_yields_trend_hit_with_first_movie() {
        let mut fetch = FetchOrchestrator::default();
        let request = fetch.issue("dune");

        let resolution = fetch.accept(request.generation, Ok(movies(&[1, 2])));
        assert_eq!(
            resolution,
            Resolution::Succeeded {
                trend_hit: Some(TrendHit {
                    term: "dune".to_string(),
                    movie: MovieSummary::new(1, "movie 1"),
                })
            }
        );
    }

    #[test]
    fn empty_query_or_empty_results_yield_no_trend_hit() {
        let mut fetch = FetchOrchestrator::default();

        let request = fetch.issue("");
        assert_eq!(
            fetch.accept(request.generation, Ok(movies(&[1]))),
            Resolution::Succeeded { trend_hit: None }
        );

        let request = fetch.issue("nothing");
        assert_eq!(
            fetch.accept(request.generation, Ok(vec![])),
            Resolution::Succeeded { trend_hit: None }
        );
        assert_eq!(fetch.outcome(), &SearchOutcome::Success(vec![]));
    }

    #[test]
    fn logical_failure_shows_payload_message_and_clears_list() {
        let mut fetch = FetchOrchestrator::default();
        let request = fetch.issue("zzznonexistent");

        let body = br#"{"response":"False","error":"No movies found"}"#;
        assert_eq!(fetch.on_response(request.generation, 200, body), Resolution::Failed);
        assert_eq!(fetch.outcome(), &SearchOutcome::Error("No movies found".to_string()));
        assert!(fetch.outcome().movies().is_empty());
    }

    #[test]
    fn transport_failure_shows_generic_message() {
        let mut fetch = FetchOrchestrator::default();
        let request = fetch.issue("dune");

        assert_eq!(
            fetch.on_response(request.generation, 503, b"upstream connect error"),
            Resolution::Failed
        );
        assert_eq!(fetch.outcome().error_message(), Some(GENERIC_FETCH_ERROR));
    }

    #[test]
    fn new_settle_clears_previous_error() {
        let mut fetch = FetchOrchestrator::default();
        let request = fetch.issue("x");
        fetch.on_response(request.generation, 500, b"");
        assert!(fetch.outcome().error_message().is_some());

        fetch.issue("y");
        assert!(fetch.outcome().is_loading());
    }
}
