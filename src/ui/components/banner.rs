//! Info banner component renderer.

use crate::ui::helpers::{position_cursor, truncate_chars};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::BannerInfo;

/// Renders the banner as one full-width colored line at `row`.
///
/// # Parameters
///
/// * `row` - Row position to render the banner (1-indexed)
/// * `banner` - Banner text
/// * `theme` - Active color theme; uses `banner_fg` on `banner_bg`
/// * `cols` - Pane width in columns
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Example
///
/// ```text
///  ℹ No api_key configured: ...  (x to dismiss)
/// ```
pub fn render_banner(row: usize, banner: &BannerInfo, theme: &Theme, cols: usize) -> usize {
    let text = truncate_chars(&format!(" ℹ {}  (x to dismiss)", banner.message), cols);

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.banner_fg));
    print!("{}", Theme::bg(&theme.colors.banner_bg));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(text.chars().count())));
    print!("{}", Theme::reset());
    row + 1
}
