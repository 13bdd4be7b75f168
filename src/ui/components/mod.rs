//! Composable UI component renderers.
//!
//! Each component prints one region of the pane at a given row and returns the next
//! free row, so the layout reads top to bottom:
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Banner - optional]
//! [Search Bar - 3 lines]
//! [Trending strip - optional]
//! [Status line]
//! [Table Headers]
//! [Table Rows | Empty state]
//! [Border]
//! [Footer]
//! ```

mod banner;
mod empty;
mod footer;
mod header;
mod search;
mod status;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use banner::render_banner;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use search::render_search_bar;
use status::{render_status, render_trending};
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line at `row`.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full plugin layout for `vm`.
///
/// Regions are stacked from row 2 down; the bottom border and footer are pinned to
/// the last two rows regardless of how many movie rows were drawn.
///
/// # Parameters
///
/// * `vm` - View model computed for this frame
/// * `theme` - Active color theme
/// * `cols` - Pane width in columns
/// * `rows` - Pane height in rows
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    if let Some(banner) = &vm.banner {
        current_row = render_banner(current_row, banner, theme, cols);
    }
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);
    current_row = render_trending(current_row, &vm.trending, theme, cols);
    current_row = render_status(current_row, vm.status.as_ref(), theme, cols);
    current_row = render_table_headers(current_row, theme, cols);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row + 1, empty, theme, cols);
    } else {
        render_table_rows(current_row, &vm.display_items, theme, cols);
    }

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}
