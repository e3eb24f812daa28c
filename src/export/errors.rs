//! Export errors

use std::path::PathBuf;

use thiserror::Error;

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors raised while serializing or writing an export
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV encoding or writer failure
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    /// Export file could not be created or flushed
    #[error("Failed to write export {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// In-memory buffer could not be flushed
    #[error("Failed to flush export buffer: {0}")]
    Flush(#[source] std::io::Error),

    /// Serialized bytes were not UTF-8
    #[error("Export is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

impl ExportError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ExportError::Csv(_) => "EXPORT_CSV",
            ExportError::Io { .. } => "EXPORT_IO",
            ExportError::Flush(_) => "EXPORT_FLUSH",
            ExportError::Encoding(_) => "EXPORT_ENCODING",
        }
    }
}
