//! Employee record definition
//!
//! Field names on the wire are camelCase, matching the dataset files.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One employee row. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique identifier
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    /// Contains exactly one '@'
    pub email: String,
    /// Open set of department names
    pub department: String,
    pub position: String,
    /// Whole currency units, non-negative
    pub salary: u64,
    pub location: String,
    /// Always positive
    pub age: u32,
    pub hire_date: NaiveDate,
    /// Within [0, 5]
    pub performance_rating: f64,
    pub projects_completed: u32,
    pub is_active: bool,
    /// Ordered tags, may be empty
    #[serde(default)]
    pub skills: Vec<String>,
    /// Absent for top-level employees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
}

impl Employee {
    /// Returns "first last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
