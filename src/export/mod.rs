//! Export Serializer for rosterview
//!
//! Serializes the filtered and sorted view, not just the visible page,
//! using the registry's display formatting for every cell.

mod errors;
mod serializer;

pub use errors::{ExportError, ExportResult};
pub use serializer::{CsvExporter, ExportOptions, LineEnding, DEFAULT_EXPORT_FILE};
