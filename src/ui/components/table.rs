//! Movie table component renderer.
//!
//! Four columns: TITLE (flexible), RATING, LANG and YEAR (fixed). Supports row
//! selection and highlighting of the settled query inside titles.

use crate::ui::helpers::{
    self, position_cursor, title_column_width, LANGUAGE_COLUMN_WIDTH, RATING_COLUMN_WIDTH,
    YEAR_COLUMN_WIDTH,
};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Renders the column headings at `row`.
///
/// TITLE takes whatever width is left after the fixed RATING, LANG and YEAR columns
/// (see [`title_column_width`]).
///
/// # Parameters
///
/// * `row` - Row position to render the headings (1-indexed)
/// * `theme` - Active color theme
/// * `cols` - Pane width in columns
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Example
///
/// ```text
///  TITLE                         RATING  LANG  YEAR
/// ```
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    let title_width = title_column_width(cols);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!(
        " {:<title_width$}{:<RATING_COLUMN_WIDTH$}{:<LANGUAGE_COLUMN_WIDTH$}{:<YEAR_COLUMN_WIDTH$}",
        "TITLE", "RATING", "LANG", "YEAR"
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Renders every row starting at `row`.
///
/// Items are expected to be already windowed to the visible rows by
/// `AppState::compute_viewmodel`; nothing is clipped here.
///
/// # Parameters
///
/// * `row` - Row of the first movie (1-indexed)
/// * `items` - Visible movies, with selection and highlight ranges resolved
/// * `theme` - Active color theme
/// * `cols` - Pane width in columns
///
/// # Returns
///
/// The row after the last rendered movie (`row + items.len()`)
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders one movie row, padded to the full width so the selection background
/// covers the whole line.
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    let title_width = title_column_width(cols);

    position_cursor(row, 1);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    print!(" ");
    helpers::render_highlighted_text(&item.title, &item.highlight_ranges, theme, item.is_selected);
    print!("{}", " ".repeat(title_width.saturating_sub(item.title.chars().count())));

    print!(
        "{:<RATING_COLUMN_WIDTH$}{:<LANGUAGE_COLUMN_WIDTH$}{:<YEAR_COLUMN_WIDTH$}",
        item.rating, item.language, item.year
    );

    let line_len = 1 + title_width + RATING_COLUMN_WIDTH + LANGUAGE_COLUMN_WIDTH + YEAR_COLUMN_WIDTH;
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}
