//! View model types representing renderable UI state.
//!
//! View models are created by `AppState::compute_viewmodel()` and consumed by the
//! renderer. They hold display-ready data only: truncated titles, formatted ratings,
//! highlight ranges and the status line text.

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Header title.
    pub header: HeaderInfo,

    /// Dismissible info banner.
    pub banner: Option<BannerInfo>,

    /// Search input box.
    pub search_bar: SearchBarInfo,

    /// Trending strip entries, ranked.
    pub trending: Vec<TrendingItem>,

    /// Loading or error line above the table.
    pub status: Option<StatusInfo>,

    /// Movie rows in the visible window.
    pub display_items: Vec<DisplayItem>,

    /// Selected row relative to the visible window.
    pub selected_index: usize,

    /// Message shown instead of the table when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    /// Keybinding hints.
    pub footer: FooterInfo,
}

/// One movie row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Title, truncated to the title column.
    pub title: String,

    /// Rating label, `"N/A"` when unrated.
    pub rating: String,

    /// Original language code, `"-"` when unknown.
    pub language: String,

    /// Release year, `"-"` when unknown.
    pub year: String,

    /// Whether this row is the selection.
    pub is_selected: bool,

    /// Character ranges of `title` matching the settled query, `(start, end)` exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// One entry of the trending strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingItem {
    /// 1-based rank.
    pub rank: usize,

    /// Search term (or movie title for a blank term).
    pub label: String,

    /// Number of successful searches.
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerInfo {
    pub message: String,
}

/// Search box contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Query as typed.
    pub query: String,

    /// Whether keystrokes currently edit the query.
    pub is_typing: bool,
}

/// Kind of the status line, selects its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Loading,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub kind: StatusKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No movies found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}
