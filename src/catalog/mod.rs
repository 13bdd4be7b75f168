//! Remote movie catalog client pieces.
//!
//! The plugin never performs I/O itself: it builds [`CatalogRequest`]s that the host
//! sends, and decodes the `(status, body, context)` triple the host hands back.
//!
//! - [`gateway`]: request URLs, headers and generation context
//! - [`payload`]: response decoding into movies or typed errors

pub mod gateway;
pub mod payload;

pub use gateway::{generation_from_context, CatalogGateway, CatalogRequest, FetchMode};
pub use payload::decode_response;
