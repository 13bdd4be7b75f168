//! End-to-end search flow: event handler, catalog decoding, trend worker and JSON store.

use popcornpilot::catalog::FetchMode;
use popcornpilot::domain::error::GENERIC_FETCH_ERROR;
use popcornpilot::storage::{JsonTrendStore, TrendStore};
use popcornpilot::worker::{PopcornWorker, WorkerMessage, WorkerResponse};
use popcornpilot::{handle_event, initialize, Action, AppState, CatalogRequest, Config, Event, SearchOutcome};
use std::path::PathBuf;
use tempfile::TempDir;

/// Plugin state plus a worker, with worker replies fed back into the handler.
struct Harness {
    state: AppState,
    worker: PopcornWorker,
    store_path: PathBuf,
    posted: Vec<WorkerMessage>,
    _dir: TempDir,
}

impl Harness {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store_path = dir.path().join("trending.json");
        let config = Config {
            api_key: Some("test-key".to_string()),
            ..Config::default()
        };
        Self {
            state: initialize(&config),
            worker: PopcornWorker::at_path(store_path.clone()),
            store_path,
            posted: Vec::new(),
            _dir: dir,
        }
    }

    /// Handles `event` and runs worker actions; returns the catalog requests issued.
    fn send(&mut self, event: Event) -> Vec<CatalogRequest> {
        let (_, actions) = handle_event(&mut self.state, &event).unwrap();
        let mut requests = Vec::new();

        for action in actions {
            match action {
                Action::FetchCatalog(request) => requests.push(request),
                Action::PostToWorker(message) => {
                    self.posted.push(message.clone());
                    let response = self.worker.handle_message(message);
                    requests.extend(self.send(Event::WorkerResponse(response)));
                }
                Action::ScheduleTimer { .. } | Action::CloseFocus => {}
            }
        }
        requests
    }

    fn start(&mut self) -> CatalogRequest {
        let mut requests = self.send(Event::Start);
        assert_eq!(requests.len(), 1);
        requests.remove(0)
    }

    /// Types `text` and fires one timer per keystroke, returning the settled request.
    fn type_query(&mut self, text: &str) -> CatalogRequest {
        self.send(Event::SearchMode);
        for c in text.chars() {
            self.send(Event::Char(c));
        }
        let mut requests = Vec::new();
        for _ in text.chars() {
            requests.extend(self.send(Event::TimerElapsed));
        }
        assert_eq!(requests.len(), 1, "a burst settles once");
        requests.remove(0)
    }

    fn respond(&mut self, request: &CatalogRequest, status: u16, body: &str) {
        self.send(Event::CatalogResponse {
            generation: request.generation,
            status,
            body: body.as_bytes().to_vec(),
        });
    }

    fn trending_reads(&self) -> usize {
        self.posted
            .iter()
            .filter(|message| matches!(message, WorkerMessage::LoadTrending { .. }))
            .count()
    }

    fn recorded_searches(&self) -> Vec<(String, i64)> {
        self.posted
            .iter()
            .filter_map(|message| match message {
                WorkerMessage::RecordSearch { term, movie, .. } => Some((term.clone(), movie.id)),
                WorkerMessage::LoadTrending { .. } => None,
            })
            .collect()
    }
}

const DUNE_BODY: &str = r#"{"page":1,"results":[{"id":1,"title":"Dune","poster_path":"/d.jpg","vote_average":7.8,"release_date":"2021-09-15","original_language":"en","popularity":90.5},{"id":2,"title":"Dune: Part Two","popularity":80.0}]}"#;

#[test]
fn startup_fetches_popular_movies() {
    let mut harness = Harness::new();
    let request = harness.start();

    assert_eq!(
        request.mode,
        FetchMode::Discover {
            sort_key: "popularity.desc".to_string()
        }
    );
    assert!(request.url.contains("/discover/movie?sort_by=popularity.desc"));
    assert!(harness.state.outcome().is_loading());

    harness.respond(&request, 200, DUNE_BODY);
    assert_eq!(harness.state.movies().len(), 2);
    assert!(harness.recorded_searches().is_empty(), "discover results are not counted");
}

#[test]
fn successful_search_is_recorded_exactly_once() {
    let mut harness = Harness::new();
    let startup = harness.start();
    harness.respond(&startup, 200, r#"{"results":[]}"#);

    let request = harness.type_query("dune");
    assert_eq!(request.mode, FetchMode::Search { term: "dune".to_string() });
    harness.respond(&request, 200, DUNE_BODY);

    assert!(matches!(harness.state.outcome(), SearchOutcome::Success(movies) if movies[0].id == 1));
    assert_eq!(harness.recorded_searches(), vec![("dune".to_string(), 1)]);

    let store = JsonTrendStore::open(harness.store_path.clone()).unwrap();
    let entry = store.get("dune").unwrap().unwrap();
    assert_eq!(entry.count, 1);
    assert_eq!(entry.movie_id, 1);
}

#[test]
fn trending_is_read_once_and_not_after_recording() {
    let mut harness = Harness::new();
    let startup = harness.start();
    assert_eq!(harness.trending_reads(), 1);
    harness.respond(&startup, 200, DUNE_BODY);

    let request = harness.type_query("dune");
    let (_, actions) = handle_event(
        &mut harness.state,
        &Event::CatalogResponse {
            generation: request.generation,
            status: 200,
            body: DUNE_BODY.as_bytes().to_vec(),
        },
    )
    .unwrap();

    assert_eq!(actions.len(), 1);
    assert!(matches!(
        &actions[0],
        Action::PostToWorker(WorkerMessage::RecordSearch { term, movie, .. }) if term == "dune" && movie.id == 1
    ));
    assert!(!actions
        .iter()
        .any(|action| matches!(action, Action::PostToWorker(WorkerMessage::LoadTrending { .. }))));

    for action in actions {
        if let Action::PostToWorker(message) = action {
            harness.posted.push(message.clone());
            let response = harness.worker.handle_message(message);
            harness.send(Event::WorkerResponse(response));
        }
    }

    assert_eq!(harness.recorded_searches(), vec![("dune".to_string(), 1)]);
    assert_eq!(harness.trending_reads(), 1);
    assert!(harness.state.trending.is_empty(), "trending view stays as loaded at startup");
}

#[test]
fn logical_failure_shows_catalog_message_and_records_nothing() {
    let mut harness = Harness::new();
    harness.start();

    let request = harness.type_query("zzznonexistent");
    harness.respond(&request, 200, r#"{"response":"False","error":"No movies found"}"#);

    assert_eq!(
        harness.state.outcome(),
        &SearchOutcome::Error("No movies found".to_string())
    );
    assert!(harness.recorded_searches().is_empty());
}

#[test]
fn transport_failure_shows_generic_message() {
    let mut harness = Harness::new();
    let request = harness.start();

    harness.respond(&request, 503, "upstream connect error or disconnect/reset before headers");

    assert_eq!(
        harness.state.outcome(),
        &SearchOutcome::Error(GENERIC_FETCH_ERROR.to_string())
    );
    let vm = harness.state.compute_viewmodel(30, 100);
    assert!(!vm.status.unwrap().message.contains("upstream"));
}

#[test]
fn late_response_for_older_query_is_discarded() {
    let mut harness = Harness::new();
    let startup = harness.start();

    let first = harness.type_query("heat");
    harness.send(Event::Backspace);
    harness.send(Event::Backspace);
    let requests = harness.send(Event::TimerElapsed);
    let requests = [requests, harness.send(Event::TimerElapsed)].concat();
    assert_eq!(requests.len(), 1);
    let second = &requests[0];
    assert!(second.generation > first.generation);

    harness.respond(&first, 200, DUNE_BODY);
    harness.respond(&startup, 200, DUNE_BODY);
    assert!(harness.state.outcome().is_loading(), "stale responses keep Loading");

    harness.respond(second, 200, r#"{"results":[{"id":7,"title":"Heat"}]}"#);
    assert_eq!(harness.state.movies()[0].id, 7);
    assert_eq!(harness.recorded_searches(), vec![("he".to_string(), 7)]);
}

#[test]
fn clearing_the_query_goes_back_to_discover() {
    let mut harness = Harness::new();
    harness.start();
    harness.type_query("alien");

    harness.send(Event::Escape);
    let requests = harness.send(Event::TimerElapsed);

    assert_eq!(requests.len(), 1);
    assert!(requests[0].mode.is_discover());
}

#[test]
fn trending_survives_a_restart() {
    let mut harness = Harness::new();
    harness.start();
    for _ in 0..2 {
        let request = harness.type_query("dune");
        harness.respond(&request, 200, DUNE_BODY);
        harness.send(Event::Escape);
        harness.send(Event::TimerElapsed);
    }

    let mut restarted = PopcornWorker::at_path(harness.store_path.clone());
    let response = restarted.handle_message(WorkerMessage::load_trending(5));

    let WorkerResponse::TrendingLoaded { records } = response else {
        panic!("expected trending records");
    };
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].search_term, "dune");
    assert_eq!(records[0].count, 2);
}
