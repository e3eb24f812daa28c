//! Result sorting
//!
//! Sorts on the column's projected value, never its display string.
//! The sort is stable and deterministic: equal keys keep their incoming
//! order in both directions.

use std::cmp::Ordering;

use super::state::SortDirection;
use crate::data::Employee;
use crate::schema::{CellValue, Column};

/// Sorts filtered rows by one column
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts rows according to `column` and `direction`.
    pub fn sort<'r>(
        rows: Vec<&'r Employee>,
        column: &Column,
        direction: SortDirection,
    ) -> Vec<&'r Employee> {
        // Project once per row; the name column allocates
        let mut keyed: Vec<(CellValue<'r>, &'r Employee)> =
            rows.into_iter().map(|emp| (column.value(emp), emp)).collect();

        keyed.sort_by(|(a, _), (b, _)| {
            let ordering = Self::compare_values(a, b);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        keyed.into_iter().map(|(_, emp)| emp).collect()
    }

    /// Compares two cell values of the same column.
    ///
    /// Ordering rules:
    /// - integers and reals numerically
    /// - dates chronologically
    /// - text case-sensitively (byte order)
    /// - absent optional text before any present value
    /// - tag lists lexicographically, tag by tag
    /// - false < true
    fn compare_values(a: &CellValue<'_>, b: &CellValue<'_>) -> Ordering {
        match (a, b) {
            (CellValue::Integer(x), CellValue::Integer(y)) => x.cmp(y),
            (CellValue::Real(x), CellValue::Real(y)) => x.total_cmp(y),
            (CellValue::Date(x), CellValue::Date(y)) => x.cmp(y),
            (CellValue::Text(x), CellValue::Text(y)) => x.cmp(y),
            (CellValue::OptionalText(x), CellValue::OptionalText(y)) => x.cmp(y),
            (CellValue::Tags(x), CellValue::Tags(y)) => x.cmp(y),
            (CellValue::Bool(x), CellValue::Bool(y)) => x.cmp(y),
            // One column never mixes variants
            _ => Ordering::Equal,
        }
    }
}
