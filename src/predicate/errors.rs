//! Filter error types
//!
//! Error codes:
//! - FILTER_MALFORMED (REJECT)
//! - FILTER_KIND_MISMATCH (REJECT)
//!
//! A rejected filter leaves the previous FilterState untouched. Input is
//! never coerced into something the user did not type.

use std::fmt;

use crate::schema::Severity;

/// Filter-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterErrorCode {
    /// Value cannot be parsed or violates the filter's own constraints
    Malformed,
    /// Filter kind does not apply to the target column
    KindMismatch,
}

impl FilterErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            FilterErrorCode::Malformed => "FILTER_MALFORMED",
            FilterErrorCode::KindMismatch => "FILTER_KIND_MISMATCH",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for FilterErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Filter error with the offending column and input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterError {
    code: FilterErrorCode,
    column: String,
    message: String,
}

impl FilterError {
    /// Create a malformed filter error
    pub fn malformed(column: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: FilterErrorCode::Malformed,
            column: column.into(),
            message: reason.into(),
        }
    }

    /// Create a kind mismatch error
    pub fn kind_mismatch(column: impl Into<String>, requested: &str, declared: &str) -> Self {
        Self {
            code: FilterErrorCode::KindMismatch,
            column: column.into(),
            message: format!("{} filter cannot be applied to a {} column", requested, declared),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> FilterErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the column the filter targeted
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: column '{}': {}",
            self.code.severity(),
            self.code.code(),
            self.column,
            self.message
        )
    }
}

impl std::error::Error for FilterError {}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
