//! CSV export serializer
//!
//! Header row is the column labels in registry order; each data row is
//! every column's display string, formatted by the same registry that
//! renders the view. Fields are quoted only when they contain the
//! delimiter, a quote or a line break, with quotes doubled.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};

use super::errors::{ExportError, ExportResult};
use crate::data::Employee;
use crate::schema::SchemaRegistry;

/// Default export file name
pub const DEFAULT_EXPORT_FILE: &str = "employee-data.csv";

/// Record terminator, fixed for a whole file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    fn terminator(self) -> Terminator {
        match self {
            LineEnding::Lf => Terminator::Any(b'\n'),
            LineEnding::CrLf => Terminator::CRLF,
        }
    }
}

/// Serializer options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub delimiter: u8,
    pub line_ending: LineEnding,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            line_ending: LineEnding::Lf,
        }
    }
}

/// Writes filtered and sorted rows as delimited text
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    options: ExportOptions,
}

impl CsvExporter {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Serializes `rows` into a string.
    ///
    /// Identical input gives byte-identical output. No rows gives the
    /// header row alone.
    pub fn serialize(&self, rows: &[&Employee], registry: &SchemaRegistry) -> ExportResult<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer, rows, registry)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Writes the export to `writer`; returns the number of data rows
    pub fn write_to<W: Write>(
        &self,
        writer: W,
        rows: &[&Employee],
        registry: &SchemaRegistry,
    ) -> ExportResult<usize> {
        let mut wtr = WriterBuilder::new()
            .delimiter(self.options.delimiter)
            .quote_style(QuoteStyle::Necessary)
            .terminator(self.options.line_ending.terminator())
            .from_writer(writer);

        wtr.write_record(registry.labels())?;
        for emp in rows {
            wtr.write_record(registry.format_row(emp))?;
        }
        wtr.flush().map_err(ExportError::Flush)?;

        Ok(rows.len())
    }

    /// Writes the export to a file, replacing it if present
    pub fn write_file(
        &self,
        path: &Path,
        rows: &[&Employee],
        registry: &SchemaRegistry,
    ) -> ExportResult<usize> {
        let file = File::create(path).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let written = self.write_to(&file, rows, registry)?;
        file.sync_all().map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(written)
    }
}
