//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place where [`AppState`] changes. It pattern-matches
//! the event, mutates state through the debouncer and fetch orchestrator, and returns
//! whether a re-render is needed plus the actions the runtime must execute.
//!
//! # Event Types
//!
//! - **Lifecycle**: `Start`, `PermissionDenied`
//! - **Navigation**: `KeyDown`, `KeyUp`, `CloseFocus`
//! - **Input**: `Char`, `Backspace`, `Escape`, `Refresh`, `DismissBanner`
//! - **Mode switching**: `SearchMode`, `FocusSearchBar`, `FocusResults`, `ExitSearch`
//! - **Host callbacks**: `TimerElapsed`, `CatalogResponse`, `WorkerResponse`

use crate::app::modes::{InputMode, SearchFocus};
use crate::app::{Action, AppState, Resolution};
use crate::domain::error::Result;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Banner shown when the user refuses the web access permission.
pub const WEB_ACCESS_DENIED: &str = "Web access was denied; the movie catalog cannot be reached";

/// Events triggered by user input, host callbacks, or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Web access was granted: run the startup fetch and trending read once.
    ///
    /// The startup fetch always uses the empty query (popular movies). Text typed
    /// before the grant stays in the search box and is fetched when its pending
    /// timer fires or on `Refresh`.
    Start,
    /// Web access was refused.
    PermissionDenied,

    /// Moves selection down by one (wraps).
    KeyDown,
    /// Moves selection up by one (wraps).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,

    /// Enters search mode with typing focus.
    SearchMode,
    /// Returns focus from the results to the query.
    FocusSearchBar,
    /// Moves focus from the query to the results.
    FocusResults,
    /// Leaves search mode keeping the query.
    ExitSearch,
    /// Clears the query and leaves search mode.
    Escape,
    /// Appends a character to the raw query.
    Char(char),
    /// Removes the last character of the raw query.
    Backspace,

    /// Re-settles the current raw query immediately.
    Refresh,
    /// Hides the info banner.
    DismissBanner,

    /// A debounce timer fired.
    TimerElapsed,

    /// A catalog response arrived for the request tagged `generation`.
    ///
    /// Connection failures arrive with a non-2xx status.
    CatalogResponse {
        generation: u64,
        status: u16,
        body: Vec<u8>,
    },

    /// A response from the trend worker.
    WorkerResponse(WorkerResponse),
}

impl Event {
    /// Short name for spans and logs; never includes response bodies.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::PermissionDenied => "PermissionDenied",
            Self::KeyDown => "KeyDown",
            Self::KeyUp => "KeyUp",
            Self::CloseFocus => "CloseFocus",
            Self::SearchMode => "SearchMode",
            Self::FocusSearchBar => "FocusSearchBar",
            Self::FocusResults => "FocusResults",
            Self::ExitSearch => "ExitSearch",
            Self::Escape => "Escape",
            Self::Char(_) => "Char",
            Self::Backspace => "Backspace",
            Self::Refresh => "Refresh",
            Self::DismissBanner => "DismissBanner",
            Self::TimerElapsed => "TimerElapsed",
            Self::CatalogResponse { .. } => "CatalogResponse",
            Self::WorkerResponse(_) => "WorkerResponse",
        }
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns `(should_render, actions)`.
///
/// # Errors
///
/// Currently every event is handled infallibly; the `Result` keeps the runtime's
/// error path in one place.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    match event {
        Event::Start => {
            if state.started {
                tracing::debug!("startup already ran");
                return Ok((false, vec![]));
            }
            state.started = true;

            let mut actions = settle(state, "");
            actions.push(Action::PostToWorker(WorkerMessage::load_trending(state.trending_limit)));
            Ok((true, actions))
        }
        Event::PermissionDenied => {
            tracing::warn!("web access denied");
            state.banner = Some(WEB_ACCESS_DENIED.to_string());
            Ok((true, vec![]))
        }
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::SearchMode | Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::Escape => {
            state.input_mode = InputMode::Normal;
            if state.debouncer.raw().is_empty() {
                return Ok((true, vec![]));
            }
            tracing::debug!("clearing query");
            Ok((true, change_query(state, String::new())))
        }
        Event::Char(c) => {
            if !state.input_mode.is_typing() {
                return Ok((false, vec![]));
            }
            let mut raw = state.debouncer.raw().to_string();
            raw.push(*c);
            Ok((true, change_query(state, raw)))
        }
        Event::Backspace => {
            if !state.input_mode.is_typing() {
                return Ok((false, vec![]));
            }
            let mut raw = state.debouncer.raw().to_string();
            if raw.pop().is_none() {
                return Ok((false, vec![]));
            }
            Ok((true, change_query(state, raw)))
        }
        Event::Refresh => {
            if !state.started {
                return Ok((false, vec![]));
            }
            let settled = state.debouncer.settle_now();
            Ok((true, settle(state, &settled)))
        }
        Event::DismissBanner => Ok((state.banner.take().is_some(), vec![])),
        Event::TimerElapsed => match state.debouncer.on_timer_elapsed() {
            Some(settled) => Ok((true, settle(state, &settled))),
            None => Ok((false, vec![])),
        },
        Event::CatalogResponse {
            generation,
            status,
            body,
        } => match state.fetch.on_response(*generation, *status, body) {
            Resolution::Discarded => Ok((false, vec![])),
            Resolution::Failed => Ok((true, vec![])),
            Resolution::Succeeded { trend_hit } => {
                state.selected_index = 0;
                let actions = trend_hit
                    .into_iter()
                    .map(|hit| {
                        tracing::debug!(term = %hit.term, movie_id = hit.movie.id, "recording search");
                        Action::PostToWorker(WorkerMessage::record_search(hit.term, hit.movie))
                    })
                    .collect();
                Ok((true, actions))
            }
        },
        Event::WorkerResponse(response) => match response {
            WorkerResponse::TrendingLoaded { records } => {
                if &state.trending == records {
                    tracing::debug!("trending unchanged, skipping render");
                    return Ok((false, vec![]));
                }
                tracing::debug!(record_count = records.len(), "trending view updated");
                state.trending.clone_from(records);
                Ok((true, vec![]))
            }
            WorkerResponse::SearchRecorded { term, count } => {
                tracing::debug!(term = %term, count, "search recorded");
                Ok((false, vec![]))
            }
            WorkerResponse::Error { message } => {
                tracing::warn!(error = %message, "trend worker error");
                Ok((false, vec![]))
            }
        },
    }
}

/// Stores a new raw query and arms its debounce timer.
fn change_query(state: &mut AppState, raw: String) -> Vec<Action> {
    let delay = state.debouncer.on_input_change(raw);
    vec![Action::ScheduleTimer { delay }]
}

/// Issues the fetch for a settled query, unless startup has not happened yet.
fn settle(state: &mut AppState, settled: &str) -> Vec<Action> {
    if !state.started {
        tracing::debug!("query settled before web access, not fetching");
        return vec![];
    }
    state.selected_index = 0;
    vec![Action::FetchCatalog(state.fetch.issue(settled))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::debounce::DEFAULT_QUIET_INTERVAL;
    use crate::catalog::FetchMode;
    use crate::domain::SearchOutcome;

    fn started_state() -> AppState {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::Start).unwrap();
        state
    }

    fn type_text(state: &mut AppState, text: &str) {
        handle_event(state, &Event::SearchMode).unwrap();
        for c in text.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    #[test]
    fn start_fetches_discover_and_loads_trending_once() {
        let mut state = AppState::default();
        let (render, actions) = handle_event(&mut state, &Event::Start).unwrap();

        assert!(render);
        assert_eq!(actions.len(), 2);
        assert!(matches!(&actions[0], Action::FetchCatalog(request) if request.mode.is_discover()));
        assert!(matches!(
            &actions[1],
            Action::PostToWorker(WorkerMessage::LoadTrending { limit: 5, .. })
        ));
        assert!(state.outcome().is_loading());

        let (_, again) = handle_event(&mut state, &Event::Start).unwrap();
        assert!(again.is_empty());
    }

    #[test]
    fn typing_schedules_one_timer_per_keystroke() {
        let mut state = started_state();
        handle_event(&mut state, &Event::SearchMode).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::Char('d')).unwrap();
        assert_eq!(
            actions,
            vec![Action::ScheduleTimer {
                delay: DEFAULT_QUIET_INTERVAL
            }]
        );
        assert_eq!(state.debouncer.raw(), "d");
    }

    #[test]
    fn only_last_timer_of_a_burst_fetches() {
        let mut state = started_state();
        type_text(&mut state, "dune");

        for _ in 0..3 {
            let (_, actions) = handle_event(&mut state, &Event::TimerElapsed).unwrap();
            assert!(actions.is_empty());
        }
        let (_, actions) = handle_event(&mut state, &Event::TimerElapsed).unwrap();
        assert!(matches!(
            &actions[..],
            [Action::FetchCatalog(request)] if request.url.contains("/search/movie?query=dune")
        ));
    }

    #[test]
    fn characters_outside_typing_are_ignored() {
        let mut state = started_state();
        let (render, actions) = handle_event(&mut state, &Event::Char('j')).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.debouncer.raw(), "");
    }

    #[test]
    fn backspace_on_empty_query_does_nothing() {
        let mut state = started_state();
        handle_event(&mut state, &Event::SearchMode).unwrap();
        let (render, actions) = handle_event(&mut state, &Event::Backspace).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn escape_clears_query_through_the_debouncer() {
        let mut state = started_state();
        type_text(&mut state, "ab");

        let (_, actions) = handle_event(&mut state, &Event::Escape).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.debouncer.raw(), "");
        assert!(matches!(&actions[..], [Action::ScheduleTimer { .. }]));
    }

    #[test]
    fn settles_before_start_do_not_fetch() {
        let mut state = AppState::default();
        type_text(&mut state, "x");
        let (_, actions) = handle_event(&mut state, &Event::TimerElapsed).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.outcome(), &SearchOutcome::Idle);

        let (_, actions) = handle_event(&mut state, &Event::Start).unwrap();
        assert!(matches!(&actions[0], Action::FetchCatalog(request) if request.mode.is_discover()));
        assert_eq!(state.debouncer.raw(), "x");
    }

    #[test]
    fn pending_query_typed_before_start_fetches_when_its_timer_fires() {
        let mut state = AppState::default();
        type_text(&mut state, "x");

        let (_, actions) = handle_event(&mut state, &Event::Start).unwrap();
        assert!(matches!(&actions[0], Action::FetchCatalog(request) if request.mode.is_discover()));

        let (_, actions) = handle_event(&mut state, &Event::TimerElapsed).unwrap();
        assert!(matches!(
            &actions[..],
            [Action::FetchCatalog(request)] if request.mode == FetchMode::Search { term: "x".to_string() }
        ));
    }

    #[test]
    fn refresh_reissues_current_query() {
        let mut state = started_state();
        let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
        assert!(matches!(&actions[..], [Action::FetchCatalog(request)] if request.generation == 2));
    }

    #[test]
    fn worker_error_is_logged_without_touching_outcome() {
        let mut state = started_state();
        let before = state.outcome().clone();

        let (render, actions) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::Error {
                message: "disk full".to_string(),
            }),
        )
        .unwrap();

        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.outcome(), &before);
    }

    #[test]
    fn banner_can_be_dismissed_once() {
        let mut state = AppState::default();
        handle_event(&mut state, &Event::PermissionDenied).unwrap();
        assert_eq!(state.banner.as_deref(), Some(WEB_ACCESS_DENIED));

        assert!(handle_event(&mut state, &Event::DismissBanner).unwrap().0);
        assert!(!handle_event(&mut state, &Event::DismissBanner).unwrap().0);
    }
}
