//! Application state management and view model computation.
//!
//! [`AppState`] is the single owner of everything the UI session holds: the raw and
//! settled query (inside the [`Debouncer`]), the search outcome (inside the
//! [`FetchOrchestrator`]), the last trending snapshot, selection and input mode.
//!
//! View models are computed on demand from state snapshots; nothing derived is cached
//! beyond a single render.

use super::debounce::Debouncer;
use super::fetch::FetchOrchestrator;
use super::modes::{InputMode, SearchFocus};
use crate::catalog::CatalogGateway;
use crate::domain::{MovieSummary, SearchOutcome, TrendRecord};
use crate::ui::helpers::{title_column_width, truncate_chars};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BannerInfo, DisplayItem, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo, StatusInfo,
    StatusKind, TrendingItem, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::time::Duration;

/// Default number of entries in the trending view.
pub const DEFAULT_TRENDING_LIMIT: usize = 5;

/// Rows taken by everything except the movie table body, the banner and the
/// trending strip.
const CHROME_ROWS: usize = 11;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Raw and settled query.
    pub debouncer: Debouncer,

    /// Search outcome and request generations.
    pub fetch: FetchOrchestrator,

    /// Trending snapshot from the last ranked read.
    ///
    /// Loaded once at startup; recording a search does not refresh it.
    pub trending: Vec<TrendRecord>,

    /// Size of the trending view requested from the worker.
    pub trending_limit: usize,

    /// Zero-based index of the selected movie within the current results.
    pub selected_index: usize,

    pub input_mode: InputMode,

    /// Info banner text, cleared with `x`.
    pub banner: Option<String>,

    pub theme: Theme,

    /// Whether web access was granted and the startup fetch has been issued.
    ///
    /// Settled queries are not fetched before this.
    pub started: bool,
}

impl AppState {
    /// Creates the state for a freshly loaded plugin.
    ///
    /// The outcome starts `Idle`, the query empty and the trending snapshot empty;
    /// nothing is fetched until the startup event.
    ///
    /// # Parameters
    ///
    /// * `gateway` - Catalog endpoint and credential used to build requests
    /// * `quiet_interval` - Debounce delay before a query settles
    /// * `trending_limit` - Number of trending entries requested from the worker
    /// * `theme` - Color scheme for UI rendering
    ///
    /// # Returns
    ///
    /// A new `AppState` in normal input mode, not yet started.
    ///
    /// # Example
    ///
    /// ```text
    /// let state = AppState::new(CatalogGateway::default(), Duration::from_millis(500), 5, Theme::default());
    /// assert!(!state.started);
    /// ```
    #[must_use]
    pub fn new(
        gateway: CatalogGateway,
        quiet_interval: Duration,
        trending_limit: usize,
        theme: Theme,
    ) -> Self {
        Self {
            debouncer: Debouncer::new(quiet_interval),
            fetch: FetchOrchestrator::new(gateway),
            trending: Vec::new(),
            trending_limit,
            selected_index: 0,
            input_mode: InputMode::Normal,
            banner: None,
            theme,
            started: false,
        }
    }

    /// Current search outcome.
    ///
    /// Owned by the fetch orchestrator; only the newest response can change it.
    #[must_use]
    pub const fn outcome(&self) -> &SearchOutcome {
        self.fetch.outcome()
    }

    /// Movies of the current outcome, empty unless it is a success.
    #[must_use]
    pub fn movies(&self) -> &[MovieSummary] {
        self.fetch.outcome().movies()
    }

    /// Moves selection down by one, wrapping to the top.
    ///
    /// Called by the `KeyDown` event handler. No-op while the outcome holds no movies
    /// (loading, error, or an empty result list).
    pub fn move_selection_down(&mut self) {
        let len = self.movies().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves selection up by one, wrapping to the bottom.
    ///
    /// Called by the `KeyUp` event handler. No-op while the outcome holds no movies.
    pub fn move_selection_up(&mut self) {
        let len = self.movies().len();
        if len == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = len - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Movie under the selection cursor, `None` without results.
    #[must_use]
    pub fn selected_movie(&self) -> Option<&MovieSummary> {
        self.movies().get(self.selected_index)
    }

    /// Computes a renderable view model for a `rows` x `cols` pane.
    ///
    /// Builds every region from the current state:
    ///
    /// - header with the result count and the query the results belong to
    /// - banner, search bar and trending strip
    /// - loading or error status line
    /// - the window of movies around the selection, with the settled query
    ///   fuzzy-highlighted in each title
    /// - empty state, when there is nothing to list
    /// - footer hints for the current input mode
    ///
    /// # Parameters
    ///
    /// * `rows` - Pane height; decides how many movie rows fit
    /// * `cols` - Pane width; decides the title column width and truncation
    ///
    /// # Returns
    ///
    /// A `UIViewModel` ready for `ui::components::render_layout`. Nothing is cached
    /// between calls.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", rows, cols).entered();

        let movies = self.movies();
        let available_rows = self.calculate_available_rows(rows);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(movies.len());
        if visible_end - visible_start < available_rows && movies.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let query = self.fetch.latest_query();
        let matcher = if query.is_empty() {
            None
        } else {
            Some(SkimMatcherV2::default())
        };
        let title_width = title_column_width(cols);

        let display_items = movies[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, movie)| {
                let is_selected = visible_start + relative_idx == self.selected_index;
                Self::compute_display_item(movie, is_selected, title_width, query, matcher.as_ref())
            })
            .collect();

        UIViewModel {
            header: self.compute_header(),
            banner: self.banner.as_ref().map(|message| BannerInfo {
                message: message.clone(),
            }),
            search_bar: SearchBarInfo {
                query: self.debouncer.raw().to_string(),
                is_typing: self.input_mode.is_typing(),
            },
            trending: self.compute_trending(),
            status: self.compute_status(),
            display_items,
            selected_index: self.selected_index.saturating_sub(visible_start),
            empty_state: self.compute_empty_state(),
            footer: self.compute_footer(),
        }
    }

    fn compute_display_item(
        movie: &MovieSummary,
        is_selected: bool,
        title_width: usize,
        query: &str,
        matcher: Option<&SkimMatcherV2>,
    ) -> DisplayItem {
        let title = truncate_chars(&movie.title, title_width);
        let visible_chars = title.chars().count();

        let highlight_ranges = matcher.map_or_else(Vec::new, |m| {
            compute_highlight_ranges(&movie.title, query, m)
                .into_iter()
                .filter(|&(start, _)| start < visible_chars)
                .map(|(start, end)| (start, end.min(visible_chars)))
                .collect()
        });

        DisplayItem {
            title,
            rating: movie.rating_label(),
            language: movie
                .original_language
                .clone()
                .filter(|lang| !lang.is_empty())
                .unwrap_or_else(|| "-".to_string()),
            year: movie.release_year().unwrap_or("-").to_string(),
            is_selected,
            highlight_ranges,
        }
    }

    /// Header title: popular movies for an empty query, search results otherwise.
    fn compute_header(&self) -> HeaderInfo {
        let title = match self.outcome() {
            SearchOutcome::Success(movies) if self.fetch.latest_query().is_empty() => {
                format!(" PopcornPilot · Popular movies ({}) ", movies.len())
            }
            SearchOutcome::Success(movies) => format!(
                " PopcornPilot · Results for \"{}\" ({}) ",
                self.fetch.latest_query(),
                movies.len()
            ),
            _ => " PopcornPilot ".to_string(),
        };
        HeaderInfo { title }
    }

    fn compute_trending(&self) -> Vec<TrendingItem> {
        self.trending
            .iter()
            .enumerate()
            .map(|(idx, record)| TrendingItem {
                rank: idx + 1,
                label: record.label().to_string(),
                count: record.count,
            })
            .collect()
    }

    /// Loading or error line. Error text is already user-safe.
    fn compute_status(&self) -> Option<StatusInfo> {
        match self.outcome() {
            SearchOutcome::Loading => Some(StatusInfo {
                kind: StatusKind::Loading,
                message: "Loading movies...".to_string(),
            }),
            SearchOutcome::Error(message) => Some(StatusInfo {
                kind: StatusKind::Error,
                message: message.clone(),
            }),
            SearchOutcome::Idle | SearchOutcome::Success(_) => None,
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        match self.outcome() {
            SearchOutcome::Idle => Some(EmptyState {
                message: "Waiting for web access".to_string(),
                subtitle: "Grant the plugin permission to reach the movie catalog".to_string(),
            }),
            SearchOutcome::Success(movies) if movies.is_empty() => Some(EmptyState {
                message: "No movies found".to_string(),
                subtitle: "Try a different search".to_string(),
            }),
            _ => None,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Search(SearchFocus::Typing) => {
                "Type to search  Enter: browse results  ESC: clear search".to_string()
            }
            InputMode::Search(SearchFocus::Navigating) => {
                "j/k: navigate  /: edit query  ESC: exit search".to_string()
            }
            InputMode::Normal if self.banner.is_some() => {
                "j/k: navigate  /: search  r: refresh  x: dismiss  q: quit".to_string()
            }
            InputMode::Normal => "j/k: navigate  /: search  r: refresh  q: quit".to_string(),
        };
        FooterInfo { keybindings }
    }

    /// Rows left for the movie table once the fixed regions are drawn.
    ///
    /// The banner and the trending strip each take a row only when present.
    fn calculate_available_rows(&self, total_rows: usize) -> usize {
        let banner_rows = if self.banner.is_some() { 1 } else { 0 };
        let trending_rows = if self.trending.is_empty() { 0 } else { 1 };
        total_rows.saturating_sub(CHROME_ROWS + banner_rows + trending_rows)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            CatalogGateway::default(),
            super::debounce::DEFAULT_QUIET_INTERVAL,
            DEFAULT_TRENDING_LIMIT,
            Theme::default(),
        )
    }
}

/// Character ranges of `text` matched by `query`, coalesced into `(start, end)` runs.
fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}
