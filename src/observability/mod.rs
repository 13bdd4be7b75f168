//! Span export to a local OTLP JSON file.
//!
//! The plugin has no network collector, so spans are written next to the trend store:
//!
//! ```text
//! tracing spans -> tracing-opentelemetry -> OtlpFileExporter -> popcornpilot-otlp.json
//! ```
//!
//! One line is one OTLP `resourceSpans` document. The file rotates at 10 MB into
//! `.1`, `.2` and `.3` backups. The filter comes from the `trace_level` configuration
//! key and defaults to `info`; an unparsable directive also falls back to `info`.

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, DEFAULT_TRACE_LEVEL, SERVICE_NAME};
