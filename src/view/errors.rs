//! View error types
//!
//! Error codes:
//! - SCHEMA_UNKNOWN_COLUMN, FILTER_MALFORMED, FILTER_KIND_MISMATCH (wrapped)
//! - VIEW_INVALID_PAGE_SIZE (REJECT)
//! - VIEW_NOT_SORTABLE (REJECT)
//!
//! Every setter error leaves the session exactly as it was.

use thiserror::Error;

use crate::predicate::FilterError;
use crate::schema::{SchemaError, Severity};

/// Result type for view session operations
pub type ViewResult<T> = Result<T, ViewError>;

/// Errors returned by view session setters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
    /// Column lookup failed
    #[error("{0}")]
    Schema(#[from] SchemaError),

    /// Filter input rejected
    #[error("{0}")]
    Filter(#[from] FilterError),

    /// Page size outside the offered set
    #[error("[REJECT] VIEW_INVALID_PAGE_SIZE: page size {0} is not one of 10, 20, 50, 100")]
    InvalidPageSize(usize),

    /// Sort requested on a column declared unsortable
    #[error("[REJECT] VIEW_NOT_SORTABLE: column '{0}' is not sortable")]
    NotSortable(String),
}

impl ViewError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ViewError::Schema(err) => err.code().code(),
            ViewError::Filter(err) => err.code().code(),
            ViewError::InvalidPageSize(_) => "VIEW_INVALID_PAGE_SIZE",
            ViewError::NotSortable(_) => "VIEW_NOT_SORTABLE",
        }
    }

    /// All view errors reject the request without ending the session
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_pass_through() {
        let err: ViewError = SchemaError::unknown_column("salry").into();
        assert_eq!(err.code(), "SCHEMA_UNKNOWN_COLUMN");

        let err: ViewError = FilterError::malformed("age", "'x' is not a number").into();
        assert_eq!(err.code(), "FILTER_MALFORMED");
        assert!(err.to_string().contains("FILTER_MALFORMED"));
    }

    #[test]
    fn test_view_codes() {
        assert_eq!(ViewError::InvalidPageSize(25).code(), "VIEW_INVALID_PAGE_SIZE");
        assert!(ViewError::InvalidPageSize(25).to_string().contains("25"));
        assert_eq!(ViewError::NotSortable("skills".into()).code(), "VIEW_NOT_SORTABLE");
        assert_eq!(ViewError::NotSortable("skills".into()).severity(), Severity::Reject);
    }
}
