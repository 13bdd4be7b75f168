//! Zellij plugin entry point.
//!
//! Translates host events into library [`Event`]s and library [`Action`]s into host
//! calls. All behaviour lives in the library; this file is only built for `wasm32`.
//!
//! ```text
//! ┌────────────────────────────┐        ┌────────────────────────────┐
//! │ plugin thread (State)      │  JSON  │ worker thread (TrendWorker)│
//! │ keys, timers, web results  │ ─────> │ PopcornWorker + JSON store │
//! │ handle_event, render       │ <───── │                            │
//! └────────────────────────────┘        └────────────────────────────┘
//! ```
//!
//! # Keybindings
//!
//! Global: `Ctrl+n` / `Ctrl+p` move the selection.
//!
//! Normal mode: `j`/`k` move, `/` search, `r` refresh, `x` dismiss banner,
//! `Esc` clear query, `q` close.
//!
//! Search mode, typing: characters edit the query, `Enter` browse results,
//! `Esc` clear query and leave.
//!
//! Search mode, browsing: `j`/`k` move, `/` edit query, `Esc` leave keeping the query.

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_arch = "wasm32")]
mod plugin {
    use popcornpilot::catalog::generation_from_context;
    use popcornpilot::worker::{PopcornWorker, WorkerMessage, WorkerResponse};
    use popcornpilot::{handle_event, Action, AppState, Config, Event, InputMode, SearchFocus};
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;
    use zellij_tile::prelude::*;
    use zellij_tile::shim::{post_message_to, post_message_to_plugin};

    /// Name the worker is registered under, without the `_worker` suffix.
    const WORKER_NAME: &str = "popcornpilot";

    #[derive(Default)]
    pub struct State {
        app: AppState,
    }

    impl ZellijPlugin for State {
        fn load(&mut self, configuration: BTreeMap<String, String>) {
            let config = Config::from_zellij(&configuration);
            popcornpilot::observability::init_tracing(&config);

            let _span = tracing::debug_span!("plugin_load").entered();
            self.app = popcornpilot::initialize(&config);

            request_permission(&[PermissionType::WebAccess]);
            subscribe(&[
                EventType::Key,
                EventType::Timer,
                EventType::WebRequestResult,
                EventType::CustomMessage,
                EventType::PermissionRequestResult,
            ]);
            tracing::debug!("plugin loaded, waiting for web access");
        }

        fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
            let span = tracing::debug_span!("plugin_update", event_type = host_event_name(&event));
            let _guard = span.entered();

            let Some(our_event) = self.map_event(event) else {
                return false;
            };

            match handle_event(&mut self.app, &our_event) {
                Ok((should_render, actions)) => {
                    for action in &actions {
                        execute_action(action);
                    }
                    should_render
                }
                Err(e) => {
                    tracing::warn!(error = %e, "error handling event");
                    false
                }
            }
        }

        fn render(&mut self, rows: usize, cols: usize) {
            popcornpilot::ui::render(&self.app, rows, cols);
        }
    }

    impl State {
        fn map_event(&self, event: zellij_tile::prelude::Event) -> Option<Event> {
            use zellij_tile::prelude::Event as Host;

            match event {
                Host::Key(key) => self.map_key(&key),
                Host::Timer(_) => Some(Event::TimerElapsed),
                Host::WebRequestResult(status, _headers, body, context) => {
                    let Some(generation) = generation_from_context(&context) else {
                        tracing::debug!("web response without catalog context");
                        return None;
                    };
                    Some(Event::CatalogResponse {
                        generation,
                        status,
                        body,
                    })
                }
                Host::CustomMessage(name, payload) if name == WORKER_NAME => {
                    serde_json::from_str::<WorkerResponse>(&payload)
                        .map_err(|e| tracing::warn!(error = %e, "failed to deserialize worker response"))
                        .ok()
                        .map(Event::WorkerResponse)
                }
                Host::PermissionRequestResult(PermissionStatus::Granted) => Some(Event::Start),
                Host::PermissionRequestResult(PermissionStatus::Denied) => Some(Event::PermissionDenied),
                _ => None,
            }
        }

        fn map_key(&self, key: &KeyWithModifier) -> Option<Event> {
            if key.has_modifiers(&[KeyModifier::Ctrl]) {
                return match key.bare_key {
                    BareKey::Char('n') => Some(Event::KeyDown),
                    BareKey::Char('p') => Some(Event::KeyUp),
                    _ => None,
                };
            }

            match self.app.input_mode {
                InputMode::Search(SearchFocus::Typing) => match key.bare_key {
                    BareKey::Esc => Some(Event::Escape),
                    BareKey::Enter => Some(Event::FocusResults),
                    BareKey::Down => Some(Event::KeyDown),
                    BareKey::Up => Some(Event::KeyUp),
                    BareKey::Backspace => Some(Event::Backspace),
                    BareKey::Char(c) => Some(Event::Char(c)),
                    _ => None,
                },
                InputMode::Search(SearchFocus::Navigating) => match key.bare_key {
                    BareKey::Esc => Some(Event::ExitSearch),
                    BareKey::Down | BareKey::Char('j') => Some(Event::KeyDown),
                    BareKey::Up | BareKey::Char('k') => Some(Event::KeyUp),
                    BareKey::Char('/') => Some(Event::FocusSearchBar),
                    _ => None,
                },
                InputMode::Normal => match key.bare_key {
                    BareKey::Down | BareKey::Char('j') => Some(Event::KeyDown),
                    BareKey::Up | BareKey::Char('k') => Some(Event::KeyUp),
                    BareKey::Char('/') => Some(Event::SearchMode),
                    BareKey::Char('r') => Some(Event::Refresh),
                    BareKey::Char('x') => Some(Event::DismissBanner),
                    BareKey::Char('q') => Some(Event::CloseFocus),
                    BareKey::Esc => Some(Event::Escape),
                    _ => None,
                },
            }
        }
    }

    fn host_event_name(event: &zellij_tile::prelude::Event) -> &'static str {
        use zellij_tile::prelude::Event as Host;

        match event {
            Host::Key(_) => "Key",
            Host::Timer(_) => "Timer",
            Host::WebRequestResult(..) => "WebRequestResult",
            Host::CustomMessage(..) => "CustomMessage",
            Host::PermissionRequestResult(_) => "PermissionRequestResult",
            _ => "Other",
        }
    }

    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::FetchCatalog(request) => {
                tracing::debug!(generation = request.generation, discover = request.mode.is_discover(), "sending catalog request");
                web_request(
                    &request.url,
                    HttpVerb::Get,
                    request.headers.clone(),
                    vec![],
                    request.context.clone(),
                );
            }
            Action::ScheduleTimer { delay } => set_timeout(delay.as_secs_f64()),
            Action::PostToWorker(message) => post_worker_message(message),
        }
    }

    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => post_message_to(PluginMessage {
                worker_name: Some(WORKER_NAME.to_string()),
                name: WORKER_NAME.to_string(),
                payload,
            }),
            Err(e) => tracing::warn!(error = %e, "failed to serialize worker message"),
        }
    }

    /// Host-facing worker; the store itself is never serialized.
    #[derive(Default, Serialize, Deserialize)]
    pub struct TrendWorker {
        #[serde(skip)]
        inner: PopcornWorker,
        #[serde(skip)]
        tracing_ready: bool,
    }

    impl ZellijWorker<'_> for TrendWorker {
        fn on_message(&mut self, message: String, payload: String) {
            if !self.tracing_ready {
                popcornpilot::observability::init_tracing(&Config::default());
                self.tracing_ready = true;
            }

            if let Some(response) = self.inner.handle_payload(&payload) {
                post_message_to_plugin(PluginMessage {
                    name: message,
                    payload: response,
                    worker_name: None,
                });
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
use plugin::{State, TrendWorker};
#[cfg(target_arch = "wasm32")]
use zellij_tile::prelude::*;

#[cfg(target_arch = "wasm32")]
register_plugin!(State);
#[cfg(target_arch = "wasm32")]
register_worker!(TrendWorker, popcornpilot_worker, POPCORNPILOT_WORKER);

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("popcornpilot is a Zellij plugin; build it with `cargo build --target wasm32-wasip1`");
}
