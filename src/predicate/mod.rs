//! Predicate Engine for rosterview
//!
//! Per-column filters plus a global quick-search.
//!
//! # Semantics
//!
//! - Filters combine with AND across columns, at most one per column
//! - Quick-search is a case-insensitive substring test over the display
//!   strings of searchable columns, OR across columns
//! - Filters are validated against their column before they are installed;
//!   a rejected filter leaves the state unchanged

mod engine;
mod errors;
mod filter;
mod parse;

pub use engine::PredicateEngine;
pub(crate) use engine::normalize_query;
pub use errors::{FilterError, FilterErrorCode, FilterResult};
pub use filter::{ColumnFilter, FilterState};
pub use parse::{parse_expression, FilterExpression, FilterOp, FilterParser};
