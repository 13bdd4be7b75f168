//! Trending strip and status line renderers.

use crate::ui::helpers::{position_cursor, truncate_chars};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{StatusInfo, StatusKind, TrendingItem};

/// Renders the ranked trending searches on one line at `row`.
///
/// Nothing is drawn when there are no trending searches, and the row is not used.
///
/// # Parameters
///
/// * `row` - Row position to render the strip (1-indexed)
/// * `items` - Ranked entries, best first
/// * `theme` - Active color theme; entries use `trending_fg`
/// * `cols` - Pane width in columns
///
/// # Returns
///
/// `row + 1` if the strip was drawn, `row` if `items` is empty
///
/// # Example
///
/// ```text
///  Trending: 1. dune (4)  2. heat (2)
/// ```
pub fn render_trending(row: usize, items: &[TrendingItem], theme: &Theme, cols: usize) -> usize {
    if items.is_empty() {
        return row;
    }

    let entries = items
        .iter()
        .map(|item| format!("{}. {} ({})", item.rank, item.label, item.count))
        .collect::<Vec<_>>()
        .join("  ");
    let prefix = " Trending: ";
    let text = truncate_chars(&entries, cols.saturating_sub(prefix.len()));

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{prefix}");
    print!("{}", Theme::reset());
    print!("{}", Theme::fg(&theme.colors.trending_fg));
    print!("{text}");
    print!(
        "{}",
        " ".repeat(cols.saturating_sub(prefix.len() + text.chars().count()))
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the loading or error line at `row`; a blank line when there is none.
///
/// The row is always used so the table does not jump when a request starts or ends.
///
/// # Parameters
///
/// * `row` - Row position to render the status (1-indexed)
/// * `status` - Current status, `None` when idle or showing results
/// * `theme` - Active color theme; `loading_fg` or `error_fg` by kind
/// * `cols` - Pane width in columns
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_status(row: usize, status: Option<&StatusInfo>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let Some(status) = status else {
        print!("{}", " ".repeat(cols));
        return row + 1;
    };

    let color = match status.kind {
        StatusKind::Loading => &theme.colors.loading_fg,
        StatusKind::Error => &theme.colors.error_fg,
    };
    let text = truncate_chars(&format!(" {}", status.message), cols);

    print!("{}", Theme::fg(color));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(text.chars().count())));
    print!("{}", Theme::reset());
    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_trending_uses_no_row() {
        assert_eq!(render_trending(7, &[], &Theme::default(), 80), 7);
    }

    #[test]
    fn trending_and_status_take_one_row_each() {
        let theme = Theme::default();
        let items = vec![TrendingItem {
            rank: 1,
            label: "dune".to_string(),
            count: 4,
        }];
        assert_eq!(render_trending(7, &items, &theme, 80), 8);
        assert_eq!(render_status(8, None, &theme, 80), 9);
    }
}
