//! PopcornPilot: a Zellij plugin for searching a movie catalog.
//!
//! Typing in the search box is debounced; once the query has been quiet for the
//! configured interval the plugin asks the catalog either for popular movies (empty
//! query) or for movies matching the query. Only the newest request may change what
//! is shown. Every query that returns movies is counted in a local trend store, and
//! the most searched terms are shown as a trending strip.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Zellij shim (main.rs, wasm32 only)                      │
//! │  key/timer/web/worker events -> Event, Action -> host    │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────────────────────────────────────────────────┐
//! │  app/                                                    │
//! │  handle_event -> Debouncer -> FetchOrchestrator -> Action│
//! │  AppState::compute_viewmodel                             │
//! └──────────────────────────────────────────────────────────┘
//!        │                  │                     │
//! ┌─────────────┐   ┌────────────────┐   ┌─────────────────┐
//! │ catalog/    │   │ worker/        │   │ ui/             │
//! │ URLs, JSON  │   │ trend worker   │   │ ANSI components │
//! │ decoding    │   │ IPC messages   │   │ themes          │
//! └─────────────┘   └────────────────┘   └─────────────────┘
//!                           │
//!                   ┌────────────────┐
//!                   │ storage/       │
//!                   │ TrendStore,    │
//!                   │ JSON file      │
//!                   └────────────────┘
//! ```
//!
//! `domain/` holds the shared types and errors, `infrastructure/` the sandbox paths
//! and `observability/` the OTLP file exporter.
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/popcornpilot.wasm" {
//!         api_key "..."
//!         debounce_ms "500"
//!         trending_limit "5"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Event Flow
//!
//! 1. The permission grant emits `Event::Start`: the current query settles at once,
//!    the first catalog request is issued and the worker is asked for the trending
//!    view.
//! 2. Each keystroke in the search box updates the raw query and schedules a timer.
//!    A timer settles the query only if no newer keystroke followed it.
//! 3. A settled query bumps the request generation and issues a web request tagged
//!    with that generation. Responses for older generations are dropped.
//! 4. A successful non-empty search posts `RecordSearch` to the worker, which
//!    upserts the term in the JSON store. Its reply is only logged.

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus};
pub use catalog::{CatalogGateway, CatalogRequest};
pub use domain::{MovieSummary, PopcornError, Result, SearchOutcome, TrendRecord};
pub use ui::Theme;

use app::debounce::DEFAULT_QUIET_INTERVAL;
use app::state::DEFAULT_TRENDING_LIMIT;
use catalog::gateway::DEFAULT_API_BASE_URL;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

/// Banner shown when no catalog credential is configured.
pub const MISSING_API_KEY_BANNER: &str =
    "No api_key configured: catalog requests will fail until one is set in the plugin configuration.";

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Catalog API credential. Blank values count as missing.
    pub api_key: Option<String>,

    /// Catalog base URL without a trailing slash.
    pub api_base_url: String,

    /// Quiet interval before a query settles, in milliseconds.
    pub debounce_ms: u64,

    /// Number of entries in the trending strip.
    pub trending_limit: usize,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a TOML theme; `~` maps to the `/host` mount.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for exported spans, `info` if unset.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            debounce_ms: u64::try_from(DEFAULT_QUIET_INTERVAL.as_millis()).unwrap_or(500),
            trending_limit: DEFAULT_TRENDING_LIMIT,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses the plugin configuration map.
    ///
    /// Unknown keys are ignored. Numeric values that do not parse are logged and
    /// replaced by their defaults; blank strings count as unset.
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        Self {
            api_key: text("api_key"),
            api_base_url: text("api_base_url")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            debounce_ms: parse_or_default(config, "debounce_ms", defaults.debounce_ms),
            trending_limit: parse_or_default(config, "trending_limit", defaults.trending_limit),
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
        }
    }

    #[must_use]
    pub const fn quiet_interval(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Resolves the theme: `theme_file`, then `theme`, then the default.
    ///
    /// Load failures are logged and fall through to the next source.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            match Theme::from_file(infrastructure::expand_tilde(theme_file)) {
                Ok(theme) => return theme,
                Err(e) => tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme file"),
            }
        }

        if let Some(theme_name) = &self.theme_name {
            match Theme::from_name(theme_name) {
                Some(theme) => return theme,
                None => tracing::warn!(theme_name = %theme_name, "unknown theme name"),
            }
        }

        Theme::default()
    }
}

fn parse_or_default<T: FromStr + Copy>(config: &BTreeMap<String, String>, key: &str, default: T) -> T {
    let Some(raw) = config.get(key) else {
        return default;
    };

    raw.trim().parse().unwrap_or_else(|_| {
        let error = PopcornError::Config(format!("{key} must be a non-negative integer, got {raw:?}"));
        tracing::warn!(error = %error, "using default");
        default
    })
}

/// Builds the initial application state.
///
/// Nothing is fetched here; the first request goes out on [`Event::Start`].
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    let _span = tracing::debug_span!("initialize", trending_limit = config.trending_limit).entered();

    let gateway = CatalogGateway::new(config.api_base_url.clone(), config.api_key.clone());
    let mut state = AppState::new(gateway, config.quiet_interval(), config.trending_limit, config.theme());

    if config.api_key.is_none() {
        tracing::warn!("no api_key configured");
        state.banner = Some(MISSING_API_KEY_BANNER.to_string());
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config, Config::default());
        assert_eq!(config.quiet_interval(), Duration::from_millis(500));
        assert_eq!(config.trending_limit, 5);
        assert_eq!(config.api_base_url, "https://api.themoviedb.org/3");
    }

    #[test]
    fn parses_all_keys() {
        let config = Config::from_zellij(&map(&[
            ("api_key", " secret "),
            ("api_base_url", "http://localhost:8080/3/"),
            ("debounce_ms", "250"),
            ("trending_limit", "10"),
            ("theme", "gruvbox-dark"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.api_base_url, "http://localhost:8080/3");
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.trending_limit, 10);
        assert_eq!(config.theme().name, "gruvbox-dark");
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn bad_numbers_and_blank_key_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("api_key", "   "),
            ("debounce_ms", "soon"),
            ("trending_limit", "-3"),
        ]));

        assert_eq!(config.api_key, None);
        assert_eq!(config.debounce_ms, 500);
        assert_eq!(config.trending_limit, 5);
    }

    #[test]
    fn unknown_theme_uses_default() {
        let config = Config {
            theme_name: Some("neon".to_string()),
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            ..Config::default()
        };
        assert_eq!(config.theme(), Theme::default());
    }

    #[test]
    fn missing_key_sets_banner() {
        let state = initialize(&Config::default());
        assert_eq!(state.banner.as_deref(), Some(MISSING_API_KEY_BANNER));
        assert!(!state.started);

        let state = initialize(&Config {
            api_key: Some("k".to_string()),
            ..Config::default()
        });
        assert!(state.banner.is_none());
        assert_eq!(state.trending_limit, 5);
    }
}
