//! rosterview - a deterministic tabular view engine for employee records
//!
//! Loads a read-only employee collection once and derives from it a
//! filtered, sorted and paginated view, a quick-search across formatted
//! cells, a CSV export of the full filtered view and summary statistics.
//!
//! Data flow: dataset → schema registry → predicate engine → view
//! pipeline → page. Export consumes the view before pagination.

pub mod cli;
pub mod data;
pub mod export;
pub mod observability;
pub mod predicate;
pub mod schema;
pub mod summary;
pub mod view;
