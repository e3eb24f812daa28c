//! Column schema type definitions
//!
//! Semantic types:
//! - text: free text
//! - currency: whole currency units
//! - integer: plain counts and identifiers
//! - rating: real number in [0, 5]
//! - date: calendar date
//! - boolean: Active / Inactive
//! - tag-list: ordered tags
//! - optional-text: text that may be absent

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::errors::SchemaError;
use crate::data::Employee;

/// Key of a record field exposed as a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    Id,
    /// Derived "first last" projection
    Name,
    Email,
    Department,
    Position,
    Salary,
    Location,
    Age,
    HireDate,
    PerformanceRating,
    ProjectsCompleted,
    Status,
    Skills,
    Manager,
}

impl FieldKey {
    /// All keys in default column order
    pub const ALL: [FieldKey; 14] = [
        FieldKey::Id,
        FieldKey::Name,
        FieldKey::Email,
        FieldKey::Department,
        FieldKey::Position,
        FieldKey::Salary,
        FieldKey::Location,
        FieldKey::Age,
        FieldKey::HireDate,
        FieldKey::PerformanceRating,
        FieldKey::ProjectsCompleted,
        FieldKey::Status,
        FieldKey::Skills,
        FieldKey::Manager,
    ];

    /// Returns the snake_case key used in filter expressions and config
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Id => "id",
            FieldKey::Name => "name",
            FieldKey::Email => "email",
            FieldKey::Department => "department",
            FieldKey::Position => "position",
            FieldKey::Salary => "salary",
            FieldKey::Location => "location",
            FieldKey::Age => "age",
            FieldKey::HireDate => "hire_date",
            FieldKey::PerformanceRating => "performance_rating",
            FieldKey::ProjectsCompleted => "projects_completed",
            FieldKey::Status => "status",
            FieldKey::Skills => "skills",
            FieldKey::Manager => "manager",
        }
    }

    /// Projects this field out of a record
    pub fn project<'a>(&self, emp: &'a Employee) -> CellValue<'a> {
        match self {
            FieldKey::Id => CellValue::Integer(i64::from(emp.id)),
            FieldKey::Name => CellValue::Text(Cow::Owned(emp.full_name())),
            FieldKey::Email => CellValue::Text(Cow::Borrowed(&emp.email)),
            FieldKey::Department => CellValue::Text(Cow::Borrowed(&emp.department)),
            FieldKey::Position => CellValue::Text(Cow::Borrowed(&emp.position)),
            // Saturates above i64::MAX
            FieldKey::Salary => CellValue::Integer(i64::try_from(emp.salary).unwrap_or(i64::MAX)),
            FieldKey::Location => CellValue::Text(Cow::Borrowed(&emp.location)),
            FieldKey::Age => CellValue::Integer(i64::from(emp.age)),
            FieldKey::HireDate => CellValue::Date(emp.hire_date),
            FieldKey::PerformanceRating => CellValue::Real(emp.performance_rating),
            FieldKey::ProjectsCompleted => CellValue::Integer(i64::from(emp.projects_completed)),
            FieldKey::Status => CellValue::Bool(emp.is_active),
            FieldKey::Skills => CellValue::Tags(&emp.skills),
            FieldKey::Manager => CellValue::OptionalText(emp.manager.as_deref()),
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = SchemaError;

    /// Accepts snake_case keys and the dataset's camelCase field names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.trim() {
            "id" => FieldKey::Id,
            "name" | "firstName" | "first_name" => FieldKey::Name,
            "email" => FieldKey::Email,
            "department" => FieldKey::Department,
            "position" => FieldKey::Position,
            "salary" => FieldKey::Salary,
            "location" => FieldKey::Location,
            "age" => FieldKey::Age,
            "hire_date" | "hireDate" => FieldKey::HireDate,
            "performance_rating" | "performanceRating" | "performance" => {
                FieldKey::PerformanceRating
            }
            "projects_completed" | "projectsCompleted" | "projects" => FieldKey::ProjectsCompleted,
            "status" | "is_active" | "isActive" => FieldKey::Status,
            "skills" => FieldKey::Skills,
            "manager" => FieldKey::Manager,
            other => return Err(SchemaError::unknown_column(other)),
        };
        Ok(key)
    }
}

/// A projected cell value, borrowed from the record where possible
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue<'a> {
    Text(Cow<'a, str>),
    Integer(i64),
    Real(f64),
    Date(NaiveDate),
    Bool(bool),
    Tags(&'a [String]),
    OptionalText(Option<&'a str>),
}

impl CellValue<'_> {
    /// Numeric projection used by range filters
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Integer(n) => Some(*n as f64),
            CellValue::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// Raw text projection used by text-contains filters
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            CellValue::Text(s) => Some(Cow::Borrowed(s.as_ref())),
            CellValue::OptionalText(Some(s)) => Some(Cow::Borrowed(*s)),
            CellValue::OptionalText(None) => None,
            CellValue::Tags(tags) => Some(Cow::Owned(tags.join(", "))),
            _ => None,
        }
    }
}

/// Unformatted rendering, used when a value does not fit its column's type
impl fmt::Display for CellValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Integer(n) => write!(f, "{}", n),
            CellValue::Real(r) => write!(f, "{}", r),
            CellValue::Date(d) => write!(f, "{}", d),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Tags(tags) => write!(f, "{}", tags.join(", ")),
            CellValue::OptionalText(s) => write!(f, "{}", s.unwrap_or("")),
        }
    }
}

/// Semantic type of a column, which selects its display rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SemanticType {
    Text,
    Currency,
    Integer,
    Rating,
    Date,
    Boolean,
    TagList,
    OptionalText,
}

impl SemanticType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            SemanticType::Text => "text",
            SemanticType::Currency => "currency",
            SemanticType::Integer => "integer",
            SemanticType::Rating => "rating",
            SemanticType::Date => "date",
            SemanticType::Boolean => "boolean",
            SemanticType::TagList => "tag-list",
            SemanticType::OptionalText => "optional-text",
        }
    }
}

/// How a column is filtered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    TextContains,
    NumericRange,
    SetMembership,
    DateRange,
    BooleanExact,
}

impl FilterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::TextContains => "text-contains",
            FilterKind::NumericRange => "numeric-range",
            FilterKind::SetMembership => "set-membership",
            FilterKind::DateRange => "date-range",
            FilterKind::BooleanExact => "boolean-exact",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static declaration of one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Record field this column reads
    pub key: FieldKey,
    /// Header label
    pub label: String,
    /// Display semantic
    pub semantic: SemanticType,
    /// Filter behaviour
    pub filter: FilterKind,
    /// Whether the column can be sorted
    pub sortable: bool,
    /// Whether quick-search looks at this column
    pub searchable: bool,
}

impl ColumnSpec {
    /// Create a sortable, searchable column
    pub fn new(
        key: FieldKey,
        label: impl Into<String>,
        semantic: SemanticType,
        filter: FilterKind,
    ) -> Self {
        Self {
            key,
            label: label.into(),
            semantic,
            filter,
            sortable: true,
            searchable: true,
        }
    }

    /// Disable sorting on this column
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Exclude this column from quick-search
    pub fn unsearchable(mut self) -> Self {
        self.searchable = false;
        self
    }

    /// Whether a filter of `kind` may be applied to this column.
    ///
    /// Boolean columns take a boolean-exact filter in addition to their
    /// declared kind.
    pub fn accepts(&self, kind: FilterKind) -> bool {
        kind == self.filter
            || (kind == FilterKind::BooleanExact && self.semantic == SemanticType::Boolean)
    }
}

/// The employee grid columns, in display order
pub fn default_columns() -> Vec<ColumnSpec> {
    use FilterKind as F;
    use SemanticType as S;

    vec![
        ColumnSpec::new(FieldKey::Id, "ID", S::Integer, F::NumericRange),
        ColumnSpec::new(FieldKey::Name, "Name", S::Text, F::TextContains),
        ColumnSpec::new(FieldKey::Email, "Email", S::Text, F::TextContains),
        ColumnSpec::new(FieldKey::Department, "Department", S::Text, F::SetMembership),
        ColumnSpec::new(FieldKey::Position, "Position", S::Text, F::TextContains),
        ColumnSpec::new(FieldKey::Salary, "Salary", S::Currency, F::NumericRange),
        ColumnSpec::new(FieldKey::Location, "Location", S::Text, F::SetMembership),
        ColumnSpec::new(FieldKey::Age, "Age", S::Integer, F::NumericRange),
        ColumnSpec::new(FieldKey::HireDate, "Hire Date", S::Date, F::DateRange),
        ColumnSpec::new(FieldKey::PerformanceRating, "Performance", S::Rating, F::NumericRange),
        ColumnSpec::new(FieldKey::ProjectsCompleted, "Projects", S::Integer, F::NumericRange),
        ColumnSpec::new(FieldKey::Status, "Status", S::Boolean, F::SetMembership),
        ColumnSpec::new(FieldKey::Skills, "Skills", S::TagList, F::TextContains),
        ColumnSpec::new(FieldKey::Manager, "Manager", S::OptionalText, F::TextContains),
    ]
}
