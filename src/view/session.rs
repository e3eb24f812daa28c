//! View session
//!
//! Owns the filter and view state of one user session over a shared,
//! read-only dataset. State changes only through the setters below; each
//! setter either applies fully or rejects and leaves the session as it was.
//! Changing filters, search, sort or page size returns to the first page.

use std::path::Path;

use super::errors::{ViewError, ViewResult};
use super::pipeline::{page_count, ViewPipeline};
use super::result::Page;
use super::state::{PageSize, SortDirection, SortSpec, ViewState};
use crate::data::{Dataset, Employee};
use crate::export::{CsvExporter, ExportResult};
use crate::observability::{log_event_with_fields, Event, ObservationScope};
use crate::predicate::{parse_expression, ColumnFilter, FilterParser, FilterState};
use crate::schema::{FieldKey, SchemaRegistry};

/// One interactive view over the employee collection
#[derive(Debug, Clone)]
pub struct ViewSession {
    dataset: Dataset,
    registry: SchemaRegistry,
    filters: FilterState,
    view: ViewState,
    exporter: CsvExporter,
}

impl ViewSession {
    /// Starts a session with the default columns and display locale
    pub fn new(dataset: Dataset) -> Self {
        let registry = SchemaRegistry::with_defaults(dataset.as_slice());
        Self::with_registry(dataset, registry)
    }

    /// Starts a session over a prebuilt registry
    pub fn with_registry(dataset: Dataset, registry: SchemaRegistry) -> Self {
        Self {
            dataset,
            registry,
            filters: FilterState::new(),
            view: ViewState::new(),
            exporter: CsvExporter::default(),
        }
    }

    /// Replaces the exporter used by `export_csv` and `export_to_file`
    pub fn with_exporter(mut self, exporter: CsvExporter) -> Self {
        self.exporter = exporter;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    // ==================
    // Setters
    // ==================

    /// Sets the quick-search query
    pub fn set_quick_search(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.view.search {
            return;
        }
        self.view.search = query;
        self.view.page_index = 0;

        let len = self.view.search.len().to_string();
        log_event_with_fields(Event::SearchChanged, &[("query_len", len.as_str())]);
    }

    /// Validates and installs a filter on one column
    pub fn set_filter(&mut self, key: FieldKey, filter: ColumnFilter) -> ViewResult<()> {
        let column = self.registry.column(key).map_err(|err| rejected(err.into()))?;

        if let Err(err) = self.filters.apply(column, filter) {
            return Err(rejected(err.into()));
        }
        self.view.page_index = 0;

        let active = self.filters.len().to_string();
        log_event_with_fields(
            Event::FilterApplied,
            &[("column", key.as_str()), ("active", active.as_str())],
        );
        Ok(())
    }

    /// Parses and installs a `column=value` or `column~text` filter
    pub fn apply_filter_expr(&mut self, expr: &str) -> ViewResult<()> {
        let parsed = parse_expression(expr).map_err(|err| rejected(err.into()))?;
        let column = self
            .registry
            .column_by_name(&parsed.column)
            .map_err(|err| rejected(err.into()))?;
        let key = column.key();
        let filter = FilterParser::parse(column, parsed.op, &parsed.value)
            .map_err(|err| rejected(err.into()))?;

        self.set_filter(key, filter)
    }

    /// Removes the filter on one column; returns whether one was active
    pub fn clear_filter(&mut self, key: FieldKey) -> bool {
        let removed = self.filters.remove(key);
        if removed {
            self.view.page_index = 0;
            let active = self.filters.len().to_string();
            log_event_with_fields(
                Event::FilterApplied,
                &[("column", key.as_str()), ("active", active.as_str())],
            );
        }
        removed
    }

    /// Removes every column filter
    pub fn clear_filters(&mut self) {
        if self.filters.is_empty() {
            return;
        }
        self.filters.clear();
        self.view.page_index = 0;
        log_event_with_fields(Event::FilterApplied, &[("active", "0")]);
    }

    /// Sorts by `key` in `direction`
    pub fn set_sort(&mut self, key: FieldKey, direction: SortDirection) -> ViewResult<()> {
        self.check_sortable(key)?;
        self.install_sort(Some(SortSpec { key, direction }));
        Ok(())
    }

    /// Advances the column-header click cycle: none, ascending, descending, none.
    ///
    /// Clicking a column other than the current sort column starts at
    /// ascending. Returns the new direction for `key`.
    pub fn toggle_sort(&mut self, key: FieldKey) -> ViewResult<Option<SortDirection>> {
        self.check_sortable(key)?;

        let next = match self.view.sort {
            Some(SortSpec {
                key: current,
                direction: SortDirection::Asc,
            }) if current == key => Some(SortDirection::Desc),
            Some(SortSpec {
                key: current,
                direction: SortDirection::Desc,
            }) if current == key => None,
            _ => Some(SortDirection::Asc),
        };

        self.install_sort(next.map(|direction| SortSpec { key, direction }));
        Ok(next)
    }

    /// Returns to collection order
    pub fn clear_sort(&mut self) {
        if self.view.sort.is_some() {
            self.install_sort(None);
        }
    }

    /// Moves to a page; an index past the end lands on the last page
    pub fn set_page(&mut self, index: usize) {
        let count = page_count(self.filtered_count(), self.view.page_size.get());
        let effective = index.min(count - 1);
        if effective != index {
            let requested = index.to_string();
            let landed = effective.to_string();
            log_event_with_fields(
                Event::PageClamped,
                &[("requested", requested.as_str()), ("effective", landed.as_str())],
            );
        }
        self.view.page_index = effective;
    }

    /// Sets rows per page; only 10, 20, 50 and 100 are offered
    pub fn set_page_size(&mut self, size: usize) -> ViewResult<()> {
        let size = PageSize::try_from(size).map_err(rejected)?;
        self.view.page_size = size;
        self.view.page_index = 0;

        let rows = size.to_string();
        log_event_with_fields(Event::PageSizeChanged, &[("page_size", rows.as_str())]);
        Ok(())
    }

    // ==================
    // Reads
    // ==================

    /// The visible page plus total filtered count
    pub fn current_page(&self) -> Page<'_> {
        self.pipeline()
            .compute_page(self.dataset.as_slice(), &self.filters, &self.view)
    }

    /// Rows passing filters and quick-search
    pub fn filtered_count(&self) -> usize {
        self.pipeline()
            .filtered(self.dataset.as_slice(), &self.filters, &self.view.search)
            .len()
    }

    /// The whole filtered and sorted set, ignoring pagination
    pub fn filtered_sorted(&self) -> Vec<&Employee> {
        self.pipeline()
            .filtered_sorted(self.dataset.as_slice(), &self.filters, &self.view)
    }

    // ==================
    // Export
    // ==================

    /// Serializes the filtered and sorted set as CSV
    pub fn export_csv(&self) -> ExportResult<String> {
        let rows = self.filtered_sorted();
        self.exporter.serialize(&rows, &self.registry)
    }

    /// Writes the filtered and sorted set to a CSV file; returns the row count
    pub fn export_to_file(&self, path: &Path) -> ExportResult<usize> {
        let path_str = path.display().to_string();
        let scope = ObservationScope::with_fields("EXPORT", &[("path", path_str.as_str())]);

        let rows = self.filtered_sorted();
        match self.exporter.write_file(path, &rows, &self.registry) {
            Ok(written) => {
                let count = written.to_string();
                scope.complete_with_fields(&[("rows", count.as_str())]);
                log_event_with_fields(
                    Event::ExportWritten,
                    &[("path", path_str.as_str()), ("rows", count.as_str())],
                );
                Ok(written)
            }
            Err(err) => {
                scope.fail(&err.to_string());
                log_event_with_fields(
                    Event::ExportFailed,
                    &[("path", path_str.as_str()), ("code", err.code())],
                );
                Err(err)
            }
        }
    }

    fn pipeline(&self) -> ViewPipeline<'_> {
        ViewPipeline::new(&self.registry)
    }

    fn check_sortable(&self, key: FieldKey) -> ViewResult<()> {
        let column = self.registry.column(key).map_err(|err| rejected(err.into()))?;
        if !column.spec().sortable {
            return Err(rejected(ViewError::NotSortable(key.as_str().to_string())));
        }
        Ok(())
    }

    fn install_sort(&mut self, sort: Option<SortSpec>) {
        self.view.sort = sort;
        self.view.page_index = 0;

        let (column, direction) = match sort {
            Some(spec) => (spec.key.as_str(), spec.direction.as_str()),
            None => ("", "none"),
        };
        log_event_with_fields(
            Event::SortChanged,
            &[("column", column), ("direction", direction)],
        );
    }
}

/// Logs a rejected setter call and hands the error back
fn rejected(err: ViewError) -> ViewError {
    let event = match err {
        ViewError::Filter(_) => Event::FilterRejected,
        _ => Event::RequestRejected,
    };
    let message = err.to_string();
    log_event_with_fields(
        event,
        &[("code", err.code()), ("message", message.as_str())],
    );
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DatasetLoader;
    use chrono::NaiveDate;

    fn employee(id: u32, department: &str, salary: u64) -> Employee {
        Employee {
            id,
            first_name: "Noor".into(),
            last_name: format!("Haddad{}", id),
            email: format!("noor{}@corp.test", id),
            department: department.into(),
            position: "Consultant".into(),
            salary,
            location: "Amman".into(),
            age: 35,
            hire_date: NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(),
            performance_rating: 3.5,
            projects_completed: 4,
            is_active: true,
            skills: vec![],
            manager: None,
        }
    }

    fn session(n: u32) -> ViewSession {
        let records = (1..=n)
            .map(|i| employee(i, if i % 3 == 0 { "Sales" } else { "Eng" }, 1000 * u64::from(i)))
            .collect();
        ViewSession::new(DatasetLoader::from_records(records).unwrap())
    }

    #[test]
    fn test_rejected_filter_keeps_state() {
        let mut session = session(6);
        session.apply_filter_expr("salary=2000..4000").unwrap();
        let before = session.filters().clone();

        let err = session.apply_filter_expr("salary=abc").unwrap_err();
        assert_eq!(err.code(), "FILTER_MALFORMED");
        let err = session.apply_filter_expr("salry=1").unwrap_err();
        assert_eq!(err.code(), "SCHEMA_UNKNOWN_COLUMN");
        let err = session.apply_filter_expr("age~3").unwrap_err();
        assert_eq!(err.code(), "FILTER_KIND_MISMATCH");

        assert_eq!(session.filters(), &before);
        assert_eq!(session.filtered_count(), 3);
    }

    #[test]
    fn test_changes_reset_page() {
        let mut session = session(60);
        session.set_page(2);
        assert_eq!(session.view_state().page_index, 2);

        session.set_quick_search("noor");
        assert_eq!(session.view_state().page_index, 0);

        session.set_page(1);
        session.set_sort(FieldKey::Salary, SortDirection::Desc).unwrap();
        assert_eq!(session.view_state().page_index, 0);

        session.set_page(1);
        session.apply_filter_expr("department=Eng").unwrap();
        assert_eq!(session.view_state().page_index, 0);

        session.set_page(1);
        session.set_page_size(10).unwrap();
        assert_eq!(session.view_state().page_index, 0);
    }

    #[test]
    fn test_set_page_clamps() {
        let mut session = session(45);
        session.set_page(7);
        assert_eq!(session.view_state().page_index, 2);
        assert_eq!(session.current_page().len(), 5);
    }

    #[test]
    fn test_invalid_page_size_rejected() {
        let mut session = session(5);
        let err = session.set_page_size(25).unwrap_err();
        assert_eq!(err.code(), "VIEW_INVALID_PAGE_SIZE");
        assert_eq!(session.view_state().page_size, PageSize::TWENTY);
    }

    #[test]
    fn test_toggle_sort_cycle() {
        let mut session = session(3);
        assert_eq!(session.toggle_sort(FieldKey::Salary).unwrap(), Some(SortDirection::Asc));
        assert_eq!(session.toggle_sort(FieldKey::Salary).unwrap(), Some(SortDirection::Desc));
        assert_eq!(session.toggle_sort(FieldKey::Salary).unwrap(), None);
        assert_eq!(session.view_state().sort, None);

        session.toggle_sort(FieldKey::Salary).unwrap();
        assert_eq!(session.toggle_sort(FieldKey::Age).unwrap(), Some(SortDirection::Asc));
        assert_eq!(session.view_state().sort, Some(SortSpec::asc(FieldKey::Age)));
    }

    #[test]
    fn test_unsortable_column_rejected() {
        use crate::schema::{default_columns, DisplayLocale};

        let dataset = DatasetLoader::from_records(vec![employee(1, "Eng", 10)]).unwrap();
        let specs = default_columns()
            .into_iter()
            .map(|spec| if spec.key == FieldKey::Skills { spec.unsortable() } else { spec })
            .collect();
        let registry = SchemaRegistry::build(specs, dataset.as_slice(), DisplayLocale::default());
        let mut session = ViewSession::with_registry(dataset, registry);

        let err = session.set_sort(FieldKey::Skills, SortDirection::Asc).unwrap_err();
        assert_eq!(err.code(), "VIEW_NOT_SORTABLE");
        assert_eq!(session.view_state().sort, None);
    }

    #[test]
    fn test_clear_filters() {
        let mut session = session(9);
        session.apply_filter_expr("department=Sales").unwrap();
        assert_eq!(session.filtered_count(), 3);

        assert!(session.clear_filter(FieldKey::Department));
        assert!(!session.clear_filter(FieldKey::Department));
        assert_eq!(session.filtered_count(), 9);

        session.apply_filter_expr("department=Sales").unwrap();
        session.apply_filter_expr("salary=..3000").unwrap();
        assert_eq!(session.filtered_count(), 1);
        session.clear_filters();
        assert!(session.filters().is_empty());
    }

    #[test]
    fn test_export_ignores_pagination() {
        let mut session = session(25);
        session.set_page_size(10).unwrap();
        session.set_sort(FieldKey::Salary, SortDirection::Desc).unwrap();

        assert_eq!(session.current_page().len(), 10);
        let csv = session.export_csv().unwrap();
        assert_eq!(csv.lines().count(), 26);
        assert!(csv.lines().nth(1).unwrap().starts_with("25,"));
    }

    #[test]
    fn test_export_to_file() {
        let session = session(4);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(crate::export::DEFAULT_EXPORT_FILE);

        assert_eq!(session.export_to_file(&path).unwrap(), 4);
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, session.export_csv().unwrap());
    }
}
