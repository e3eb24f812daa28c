//! Schema registry
//!
//! Built once from the column declarations and the loaded records. The
//! build scans the collection a single time to collect the distinct values
//! offered by set-membership filters, and binds each column to its
//! formatting function.

use std::collections::HashSet;
use std::fmt;

use super::errors::{SchemaError, SchemaResult};
use super::format::{formatter_for, DisplayLocale, Formatter, ACTIVE_LABEL, INACTIVE_LABEL};
use super::types::{default_columns, CellValue, ColumnSpec, FieldKey, FilterKind, SemanticType};
use crate::data::Employee;
use crate::observability::{log_event_with_fields, Event};

/// A column bound to its formatter and derived filter options
#[derive(Clone)]
pub struct Column {
    spec: ColumnSpec,
    formatter: Formatter,
    /// Distinct display values in first-encountered order (set filters only)
    options: Vec<String>,
}

impl Column {
    pub fn spec(&self) -> &ColumnSpec {
        &self.spec
    }

    pub fn key(&self) -> FieldKey {
        self.spec.key
    }

    pub fn label(&self) -> &str {
        &self.spec.label
    }

    /// Values a set-membership filter on this column may select
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Projects this column's value out of a record
    pub fn value<'a>(&self, emp: &'a Employee) -> CellValue<'a> {
        self.spec.key.project(emp)
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("spec", &self.spec)
            .field("options", &self.options)
            .finish()
    }
}

/// Ordered column registry with formatting bound at build time
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    columns: Vec<Column>,
    locale: DisplayLocale,
}

impl SchemaRegistry {
    /// Builds the registry for the given columns.
    ///
    /// When a key is declared twice only the first declaration is kept.
    pub fn build(specs: Vec<ColumnSpec>, records: &[Employee], locale: DisplayLocale) -> Self {
        let mut seen = HashSet::new();
        let mut columns: Vec<Column> = specs
            .into_iter()
            .filter(|spec| seen.insert(spec.key))
            .map(|spec| Column {
                formatter: formatter_for(spec.semantic),
                spec,
                options: Vec::new(),
            })
            .collect();

        let set_columns: Vec<usize> = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.spec.filter == FilterKind::SetMembership)
            .map(|(idx, _)| idx)
            .collect();

        // Boolean sets always offer both labels, whatever the data holds
        let mut distinct: Vec<HashSet<String>> = vec![HashSet::new(); set_columns.len()];
        for (slot, &idx) in set_columns.iter().enumerate() {
            if columns[idx].spec.semantic == SemanticType::Boolean {
                for label in [ACTIVE_LABEL, INACTIVE_LABEL] {
                    distinct[slot].insert(label.to_string());
                    columns[idx].options.push(label.to_string());
                }
            }
        }
        for emp in records {
            for (slot, &idx) in set_columns.iter().enumerate() {
                let column = &columns[idx];
                let display = (column.formatter)(&column.value(emp), &locale);
                if distinct[slot].insert(display.clone()) {
                    columns[idx].options.push(display);
                }
            }
        }

        let column_count = columns.len().to_string();
        let record_count = records.len().to_string();
        log_event_with_fields(
            Event::SchemaBuilt,
            &[
                ("columns", column_count.as_str()),
                ("records", record_count.as_str()),
            ],
        );

        Self { columns, locale }
    }

    /// Builds the registry for the default employee columns
    pub fn with_defaults(records: &[Employee]) -> Self {
        Self::build(default_columns(), records, DisplayLocale::default())
    }

    /// Columns in display order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a column by key
    pub fn column(&self, key: FieldKey) -> SchemaResult<&Column> {
        self.columns
            .iter()
            .find(|c| c.spec.key == key)
            .ok_or_else(|| SchemaError::unknown_column(key.as_str()))
    }

    /// Looks up a column by its textual key
    pub fn column_by_name(&self, name: &str) -> SchemaResult<&Column> {
        let key: FieldKey = name.parse()?;
        self.column(key)
    }

    pub fn locale(&self) -> &DisplayLocale {
        &self.locale
    }

    /// Header labels in column order
    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label()).collect()
    }

    /// Formats one cell for display
    pub fn format(&self, column: &Column, emp: &Employee) -> String {
        (column.formatter)(&column.value(emp), &self.locale)
    }

    /// Formats every cell of a record in column order
    pub fn format_row(&self, emp: &Employee) -> Vec<String> {
        self.columns.iter().map(|c| self.format(c, emp)).collect()
    }
}
