//! Dataset loading errors

use thiserror::Error;

/// Result type for dataset operations
pub type DataResult<T> = Result<T, DataError>;

/// Errors raised while reading or validating the employee collection
#[derive(Debug, Error)]
pub enum DataError {
    /// Dataset file could not be read
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Dataset is not valid JSON or does not match the record layout
    #[error("Invalid dataset JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Two records share an identifier
    #[error("Duplicate employee id {0}")]
    DuplicateId(u32),

    /// A record violates a field invariant
    #[error("Employee {id}: invalid {field}: {reason}")]
    InvalidField {
        id: u32,
        field: &'static str,
        reason: String,
    },
}

impl DataError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            DataError::Io { .. } => "DATA_IO",
            DataError::Malformed(_) => "DATA_MALFORMED",
            DataError::DuplicateId(_) => "DATA_DUPLICATE_ID",
            DataError::InvalidField { .. } => "DATA_INVALID_FIELD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DataError::DuplicateId(3).code(), "DATA_DUPLICATE_ID");
        let err = DataError::InvalidField {
            id: 7,
            field: "email",
            reason: "missing '@'".into(),
        };
        assert_eq!(err.code(), "DATA_INVALID_FIELD");
        assert!(err.to_string().contains("Employee 7"));
    }
}
