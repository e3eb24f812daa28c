//! Dataset loader
//!
//! Reads the employee collection from JSON, validates the ingestion
//! invariants and freezes it behind an `Arc` for read-only sharing.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use super::errors::{DataError, DataResult};
use super::record::Employee;
use crate::observability::{log_event_with_fields, Event};

/// `{"employees": [...]}` layout; a bare array is also accepted
#[derive(Deserialize)]
struct WrappedDocument {
    employees: Vec<Employee>,
}

/// The loaded, validated employee collection
#[derive(Debug, Clone)]
pub struct Dataset {
    employees: Arc<[Employee]>,
}

impl Dataset {
    /// Returns a shared handle to the records
    pub fn records(&self) -> Arc<[Employee]> {
        Arc::clone(&self.employees)
    }

    /// Borrow the records in collection order
    pub fn as_slice(&self) -> &[Employee] {
        &self.employees
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

/// Loads datasets from disk or memory
pub struct DatasetLoader;

impl DatasetLoader {
    /// Loads and validates a dataset file.
    pub fn load(path: &Path) -> DataResult<Dataset> {
        let content = fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let dataset = Self::from_json(&content)?;

        let count = dataset.len().to_string();
        let path_str = path.display().to_string();
        log_event_with_fields(
            Event::DatasetLoaded,
            &[("path", path_str.as_str()), ("records", count.as_str())],
        );

        Ok(dataset)
    }

    /// Parses and validates a dataset from a JSON string.
    pub fn from_json(json: &str) -> DataResult<Dataset> {
        // Pick the layout up front so serde reports the offending field
        let employees = if json.trim_start().starts_with('{') {
            serde_json::from_str::<WrappedDocument>(json)?.employees
        } else {
            serde_json::from_str::<Vec<Employee>>(json)?
        };
        Self::from_records(employees)
    }

    /// Validates records supplied programmatically.
    pub fn from_records(employees: Vec<Employee>) -> DataResult<Dataset> {
        Self::validate(&employees)?;
        Ok(Dataset {
            employees: employees.into(),
        })
    }

    fn validate(employees: &[Employee]) -> DataResult<()> {
        let mut seen = HashSet::with_capacity(employees.len());

        for emp in employees {
            if !seen.insert(emp.id) {
                return Err(DataError::DuplicateId(emp.id));
            }

            let at_signs = emp.email.matches('@').count();
            if at_signs != 1 {
                return Err(DataError::InvalidField {
                    id: emp.id,
                    field: "email",
                    reason: format!("expected exactly one '@', found {}", at_signs),
                });
            }

            let rating = emp.performance_rating;
            if !rating.is_finite() || !(0.0..=5.0).contains(&rating) {
                return Err(DataError::InvalidField {
                    id: emp.id,
                    field: "performanceRating",
                    reason: format!("{} is outside [0, 5]", rating),
                });
            }

            if emp.age == 0 {
                return Err(DataError::InvalidField {
                    id: emp.id,
                    field: "age",
                    reason: "must be positive".into(),
                });
            }
        }

        Ok(())
    }
}
