//! User interface rendering layer.
//!
//! Transforms view models into ANSI-styled output through small components, with
//! TOML themes and fuzzy match highlighting of the settled query.
//!
//! # Modules
//!
//! - [`viewmodel`]: renderable UI state
//! - [`renderer`]: top-level rendering entry point
//! - [`components`]: region renderers (header, search, trending, table, ...)
//! - [`helpers`]: cursor, column and highlight utilities
//! - [`theme`]: color schemes and escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    BannerInfo, DisplayItem, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo, StatusInfo,
    StatusKind, TrendingItem, UIViewModel,
};
