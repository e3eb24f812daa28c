//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code after the
//! error response has been written.

use std::fmt;
use std::io;

use crate::data::DataError;
use crate::export::ExportError;
use crate::view::ViewError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file missing, unreadable or invalid
    ConfigError,
    /// Dataset could not be loaded
    DataError,
    /// A filter, sort or paging argument was rejected
    Rejected,
    /// Export could not be written
    ExportError,
    /// I/O error on stdout
    IoError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "ROSTER_CLI_CONFIG_ERROR",
            Self::DataError => "ROSTER_CLI_DATA_ERROR",
            Self::Rejected => "ROSTER_CLI_REJECTED",
            Self::ExportError => "ROSTER_CLI_EXPORT_ERROR",
            Self::IoError => "ROSTER_CLI_IO_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<DataError> for CliError {
    fn from(e: DataError) -> Self {
        Self::new(CliErrorCode::DataError, format!("{} ({})", e, e.code()))
    }
}

impl From<ViewError> for CliError {
    fn from(e: ViewError) -> Self {
        Self::new(CliErrorCode::Rejected, e.to_string())
    }
}

impl From<ExportError> for CliError {
    fn from(e: ExportError) -> Self {
        Self::new(CliErrorCode::ExportError, format!("{} ({})", e, e.code()))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
