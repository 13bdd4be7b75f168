//! Shared rendering utilities.
//!
//! Cursor positioning, column sizing and match highlighting used by several
//! components. All text measurements are in characters, not bytes.

use crate::ui::theme::Theme;

/// Width of the RATING column including its separator.
pub const RATING_COLUMN_WIDTH: usize = 8;

/// Width of the LANG column including its separator.
pub const LANGUAGE_COLUMN_WIDTH: usize = 6;

/// Width of the YEAR column including its separator.
pub const YEAR_COLUMN_WIDTH: usize = 6;

const MIN_TITLE_WIDTH: usize = 12;

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Width of the TITLE column for a pane `cols` wide.
#[must_use]
pub fn title_column_width(cols: usize) -> usize {
    cols.saturating_sub(RATING_COLUMN_WIDTH + LANGUAGE_COLUMN_WIDTH + YEAR_COLUMN_WIDTH + 1)
        .max(MIN_TITLE_WIDTH)
}

/// Truncates `text` to at most `max` characters, marking the cut with `...`.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let mut truncated: String = text.chars().take(max - 3).collect();
    truncated.push_str("...");
    truncated
}

/// Renders text with highlighted character ranges.
///
/// Highlighting is skipped on the selected row so the selection colors stay intact.
/// Ranges are `(start, end)` character indices, exclusive end, in ascending order.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        let normal_section: String = chars[current_pos..start].iter().collect();
        print!("{normal_section}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate_chars("Amélie", 10), "Amélie");
        assert_eq!(truncate_chars("千と千尋の神隠し", 5), "千と...");
        assert_eq!(truncate_chars("abcdef", 2), "ab");
    }

    #[test]
    fn title_column_never_collapses() {
        assert_eq!(title_column_width(10), MIN_TITLE_WIDTH);
        assert_eq!(title_column_width(100), 100 - 21);
    }
}
