//! Predicate evaluation
//!
//! A record is visible iff every active column filter holds (AND across
//! columns) and the quick-search query matches at least one searchable
//! column's display string.

use super::filter::{ColumnFilter, FilterState};
use crate::data::Employee;
use crate::schema::{CellValue, Column, SchemaRegistry};

/// Evaluates filters and quick-search against records
pub struct PredicateEngine<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> PredicateEngine<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Checks if a record passes all active filters.
    ///
    /// Filters keyed on a column outside the registry are ignored.
    pub fn matches(&self, emp: &Employee, filters: &FilterState) -> bool {
        filters.iter().all(|(key, filter)| match self.registry.column(*key) {
            Ok(column) => self.evaluate(column, filter, emp),
            Err(_) => true,
        })
    }

    /// Checks if the query occurs in any searchable column's display string.
    ///
    /// Case-insensitive. A query that is empty after trimming matches all.
    pub fn quick_matches(&self, emp: &Employee, query: &str) -> bool {
        let needle = normalize_query(query);
        self.quick_matches_normalized(emp, &needle)
    }

    /// Combined visibility: column filters AND quick-search
    pub fn is_visible(&self, emp: &Employee, filters: &FilterState, query: &str) -> bool {
        let needle = normalize_query(query);
        self.matches(emp, filters) && self.quick_matches_normalized(emp, &needle)
    }

    /// `needle` must already be trimmed and lowercased
    pub(crate) fn quick_matches_normalized(&self, emp: &Employee, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.registry
            .columns()
            .iter()
            .filter(|c| c.spec().searchable)
            .any(|c| self.registry.format(c, emp).to_lowercase().contains(needle))
    }

    fn evaluate(&self, column: &Column, filter: &ColumnFilter, emp: &Employee) -> bool {
        let value = column.value(emp);

        match filter {
            ColumnFilter::TextContains { value: needle } => {
                let needle = needle.to_lowercase();
                let haystack = match &value {
                    CellValue::OptionalText(None) => return needle.is_empty(),
                    v => match v.as_text() {
                        Some(text) => text.into_owned(),
                        None => self.registry.format(column, emp),
                    },
                };
                haystack.to_lowercase().contains(&needle)
            }
            ColumnFilter::NumericRange { min, max } => match value.as_number() {
                Some(n) => min.map_or(true, |lo| n >= lo) && max.map_or(true, |hi| n <= hi),
                None => false,
            },
            ColumnFilter::SetMembership { values } => {
                // Empty selection means no restriction
                values.is_empty() || values.contains(&self.registry.format(column, emp))
            }
            ColumnFilter::DateRange { from, to } => match value {
                CellValue::Date(d) => {
                    from.map_or(true, |lo| d >= lo) && to.map_or(true, |hi| d <= hi)
                }
                _ => false,
            },
            ColumnFilter::BooleanExact { value: expected } => match value {
                CellValue::Bool(b) => b == *expected,
                _ => false,
            },
        }
    }
}

/// Trims and lowercases a quick-search query
pub(crate) fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}
