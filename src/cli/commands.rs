//! CLI command implementations
//!
//! Every command loads the configuration, loads the dataset, builds the
//! schema registry and then answers with a single JSON object on stdout.

use std::path::Path;

use serde_json::{json, Value};

use super::args::{Command, QueryArgs, SourceArgs};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};
use crate::data::{Dataset, DatasetLoader};
use crate::export::CsvExporter;
use crate::observability::{log_event_with_fields, Event, Logger, ObservationScope};
use crate::schema::{default_columns, SchemaRegistry};
use crate::summary::summarize;
use crate::view::{SortDirection, ViewError, ViewSession};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command and write its response.
///
/// On failure the error response is written to stdout and the error is
/// returned so the caller can exit non-zero.
pub fn run_command(cmd: Command) -> CliResult<()> {
    let result = match cmd {
        Command::Columns { source } => columns(&source),
        Command::Summary { source } => summary(&source),
        Command::View {
            source,
            query,
            page,
            page_size,
        } => view(&source, &query, page, page_size),
        Command::Export { source, query, out } => export(&source, &query, out.as_deref()),
    };

    match result {
        Ok(data) => write_response(data),
        Err(err) => {
            write_error(err.code_str(), err.message())?;
            Err(err)
        }
    }
}

/// Describe the registry's columns
pub fn columns(source: &SourceArgs) -> CliResult<Value> {
    let (_, session) = open_session(source)?;

    let columns: Vec<Value> = session
        .registry()
        .columns()
        .iter()
        .map(|column| {
            let spec = column.spec();
            json!({
                "key": spec.key,
                "label": spec.label,
                "type": spec.semantic,
                "filter": spec.filter,
                "sortable": spec.sortable,
                "searchable": spec.searchable,
                "options": column.options(),
            })
        })
        .collect();

    Ok(json!({ "columns": columns }))
}

/// Summary statistics over the whole dataset
pub fn summary(source: &SourceArgs) -> CliResult<Value> {
    let (_, session) = open_session(source)?;
    Ok(serde_json::to_value(summarize(session.dataset().as_slice()))?)
}

/// One page of the filtered and sorted view
pub fn view(
    source: &SourceArgs,
    query: &QueryArgs,
    page: usize,
    page_size: Option<usize>,
) -> CliResult<Value> {
    let (_, mut session) = open_session(source)?;
    apply_query(&mut session, query)?;

    if let Some(size) = page_size {
        session.set_page_size(size)?;
    }
    session.set_page(page);

    let registry = session.registry();
    let page = session.current_page();
    let rows: Vec<Vec<String>> = page.rows.iter().map(|emp| registry.format_row(emp)).collect();

    Ok(json!({
        "columns": registry.labels(),
        "rows": rows,
        "total_filtered": page.total_filtered,
        "total_records": session.dataset().len(),
        "page_index": page.page_index,
        "page_size": page.page_size,
        "page_count": page.page_count,
    }))
}

/// Write the filtered and sorted view as CSV
pub fn export(source: &SourceArgs, query: &QueryArgs, out: Option<&Path>) -> CliResult<Value> {
    let (config, mut session) = open_session(source)?;
    apply_query(&mut session, query)?;

    let path = out.unwrap_or(config.export_file.as_path());
    let rows = session.export_to_file(path)?;

    Ok(json!({
        "path": path.display().to_string(),
        "rows": rows,
        "total_records": session.dataset().len(),
    }))
}

/// Loads config and dataset and prepares a session configured from both
fn open_session(source: &SourceArgs) -> CliResult<(Config, ViewSession)> {
    let config = Config::resolve(source.config.as_deref())?;
    Logger::set_min_severity(config.min_severity()?);

    let data_path = config.resolve_data_path(source.data.as_deref())?;
    let page_size = config.page_size()?.to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("log_level", config.log_level.as_str()), ("page_size", page_size.as_str())],
    );

    let dataset = load_dataset(&data_path)?;
    let registry = SchemaRegistry::build(default_columns(), dataset.as_slice(), config.locale());

    let mut session = ViewSession::with_registry(dataset, registry)
        .with_exporter(CsvExporter::new(config.export_options()));
    session.set_page_size(config.page_size)?;

    Ok((config, session))
}

fn load_dataset(path: &Path) -> CliResult<Dataset> {
    let path_str = path.display().to_string();
    let scope = ObservationScope::with_fields("LOAD", &[("path", path_str.as_str())]);

    match DatasetLoader::load(path) {
        Ok(dataset) => {
            scope.complete();
            Ok(dataset)
        }
        Err(err) => {
            scope.fail(&err.to_string());
            Err(CliError::from(err))
        }
    }
}

/// Applies quick-search, filters and sort in that order
fn apply_query(session: &mut ViewSession, query: &QueryArgs) -> CliResult<()> {
    session.set_quick_search(query.search.as_str());

    for expr in &query.filters {
        session.apply_filter_expr(expr)?;
    }

    if let Some(sort) = &query.sort {
        let key = session
            .registry()
            .column_by_name(sort)
            .map_err(ViewError::from)?
            .key();
        let direction = if query.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        session.set_sort(key, direction)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DATASET: &str = r#"{"employees": [
        {"id": 1, "firstName": "Ada", "lastName": "Byron", "email": "ada@corp.test",
         "department": "Engineering", "position": "Principal Engineer", "salary": 150000,
         "location": "London", "age": 36, "hireDate": "2012-12-10", "performanceRating": 4.9,
         "projectsCompleted": 40, "isActive": true, "skills": ["Math", "Rust", "C"]},
        {"id": 2, "firstName": "Bo", "lastName": "Chen", "email": "bo@corp.test",
         "department": "Sales", "position": "Account Executive", "salary": 70000,
         "location": "Austin", "age": 29, "hireDate": "2020-05-01", "performanceRating": 3.2,
         "projectsCompleted": 6, "isActive": false, "skills": [], "manager": "Ada Byron"}
    ]}"#;

    fn fixture() -> (TempDir, SourceArgs) {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("employees.json");
        fs::write(&data, DATASET).unwrap();
        let config = dir.path().join("rosterview.json");
        fs::write(&config, r#"{"log_level": "error"}"#).unwrap();
        let source = SourceArgs {
            config: Some(config),
            data: Some(data),
        };
        (dir, source)
    }

    #[test]
    fn test_columns_lists_options() {
        let (_dir, source) = fixture();
        let out = columns(&source).unwrap();
        let cols = out["columns"].as_array().unwrap();
        assert_eq!(cols.len(), 14);
        assert_eq!(cols[3]["key"], "department");
        assert_eq!(cols[3]["filter"], "set-membership");
        assert_eq!(cols[3]["options"], json!(["Engineering", "Sales"]));
    }

    #[test]
    fn test_summary_over_full_dataset() {
        let (_dir, source) = fixture();
        let out = summary(&source).unwrap();
        assert_eq!(out["count"], 2);
        assert_eq!(out["activeCount"], 1);
        assert_eq!(out["averageSalary"], 110000);
    }

    #[test]
    fn test_view_with_filter_and_sort() {
        let (_dir, source) = fixture();
        let query = QueryArgs {
            sort: Some("salary".into()),
            ..QueryArgs::default()
        };
        let out = view(&source, &query, 0, Some(10)).unwrap();
        assert_eq!(out["total_filtered"], 2);
        assert_eq!(out["page_size"], 10);
        assert_eq!(out["rows"][0][1], "Bo Chen");
        assert_eq!(out["rows"][0][5], "$70,000");

        let query = QueryArgs {
            filters: vec!["status=inactive".into()],
            ..QueryArgs::default()
        };
        let out = view(&source, &query, 9, None).unwrap();
        assert_eq!(out["total_filtered"], 1);
        assert_eq!(out["page_index"], 0);
    }

    #[test]
    fn test_view_rejects_bad_filter() {
        let (_dir, source) = fixture();
        let query = QueryArgs {
            filters: vec!["age=old".into()],
            ..QueryArgs::default()
        };
        let err = view(&source, &query, 0, None).unwrap_err();
        assert_eq!(err.code_str(), "ROSTER_CLI_REJECTED");
        assert!(err.message().contains("FILTER_MALFORMED"));
    }

    #[test]
    fn test_export_writes_file() {
        let (dir, source) = fixture();
        let out_path = dir.path().join("out.csv");
        let query = QueryArgs {
            search: "austin".into(),
            ..QueryArgs::default()
        };
        let out = export(&source, &query, Some(&out_path)).unwrap();
        assert_eq!(out["rows"], 1);

        let csv = fs::read_to_string(&out_path).unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.lines().nth(1).unwrap().starts_with("2,Bo Chen,"));
    }

    #[test]
    fn test_missing_dataset_is_data_error() {
        let (dir, mut source) = fixture();
        source.data = Some(dir.path().join("missing.json"));
        let err = summary(&source).unwrap_err();
        assert_eq!(err.code_str(), "ROSTER_CLI_DATA_ERROR");
    }
}
