//! Input mode state types for the application.
//!
//! The plugin operates in one of two input modes:
//! - **Normal**: list navigation and commands
//! - **Search**: the query input, either being typed or with results focused

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Keystrokes edit the query.
    Typing,

    /// Keystrokes move through the result list; `/` returns to typing.
    Navigating,
}

/// Current input handling mode.
///
/// Controls which keybindings are active and the footer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation mode: j/k, `/`, `r`, `x`, `q`.
    Normal,

    /// Search mode with focus state.
    Search(SearchFocus),
}

impl InputMode {
    #[must_use]
    pub const fn is_typing(self) -> bool {
        matches!(self, Self::Search(SearchFocus::Typing))
    }
}
