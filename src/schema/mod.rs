//! Schema Registry subsystem for rosterview
//!
//! Declares every column of the employee grid: its semantic type, display
//! rule, filter kind, sortability and quick-search participation.
//!
//! # Design Principles
//!
//! - Column order is the declaration order
//! - Formatting is a static mapping from semantic type, bound at build time
//! - Set-membership options are derived from the data in one scan
//! - The same `format` is used for display, quick-search and export

mod errors;
mod format;
mod registry;
mod types;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult, Severity};
pub use format::{
    boolean_label, formatter_for, group_digits, DisplayLocale, Formatter, ACTIVE_LABEL,
    INACTIVE_LABEL, MISSING_PLACEHOLDER,
};
pub use registry::{Column, SchemaRegistry};
pub use types::{default_columns, CellValue, ColumnSpec, FieldKey, FilterKind, SemanticType};
