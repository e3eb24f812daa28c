//! View pipeline: filter, then stable sort, then clamped pagination.
//!
//! Each step is total and deterministic. The filtered and sorted set
//! before pagination is what export serializes.

use super::result::Page;
use super::sorter::ResultSorter;
use super::state::ViewState;
use crate::data::Employee;
use crate::observability::{log_event_with_fields, Event};
use crate::predicate::{normalize_query, FilterState, PredicateEngine};
use crate::schema::SchemaRegistry;

/// Computes the visible rows for a filter and view state
pub struct ViewPipeline<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> ViewPipeline<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Rows passing filters and quick-search, in collection order
    pub fn filtered<'r>(
        &self,
        records: &'r [Employee],
        filters: &FilterState,
        search: &str,
    ) -> Vec<&'r Employee> {
        let engine = PredicateEngine::new(self.registry);
        let needle = normalize_query(search);
        records
            .iter()
            .filter(|emp| engine.matches(emp, filters) && engine.quick_matches_normalized(emp, &needle))
            .collect()
    }

    /// Filtered rows in view order, before pagination.
    ///
    /// A sort on a column that is missing from the registry or declared
    /// unsortable keeps collection order.
    pub fn filtered_sorted<'r>(
        &self,
        records: &'r [Employee],
        filters: &FilterState,
        view: &ViewState,
    ) -> Vec<&'r Employee> {
        let rows = self.filtered(records, filters, &view.search);

        let Some(sort) = view.sort else {
            return rows;
        };
        match self.registry.column(sort.key) {
            Ok(column) if column.spec().sortable => {
                ResultSorter::sort(rows, column, sort.direction)
            }
            _ => rows,
        }
    }

    /// Computes the visible page.
    ///
    /// A page index past the end is clamped to the last page. With no
    /// matching rows the page is index 0 and empty.
    pub fn compute_page<'r>(
        &self,
        records: &'r [Employee],
        filters: &FilterState,
        view: &ViewState,
    ) -> Page<'r> {
        let rows = self.filtered_sorted(records, filters, view);
        paginate(rows, view)
    }
}

/// Number of pages for `total` rows; at least 1
pub(crate) fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size).max(1)
}

fn paginate<'r>(rows: Vec<&'r Employee>, view: &ViewState) -> Page<'r> {
    let total_filtered = rows.len();
    let size = view.page_size.get();
    let page_count = page_count(total_filtered, size);
    let page_index = view.page_index.min(page_count - 1);

    if page_index != view.page_index {
        let requested = view.page_index.to_string();
        let effective = page_index.to_string();
        log_event_with_fields(
            Event::PageClamped,
            &[
                ("requested", requested.as_str()),
                ("effective", effective.as_str()),
            ],
        );
    }

    let start = page_index * size;
    let end = (start + size).min(total_filtered);
    let rows = rows
        .into_iter()
        .skip(start)
        .take(end.saturating_sub(start))
        .collect();

    Page {
        rows,
        total_filtered,
        page_index,
        page_size: view.page_size,
        page_count,
    }
}
