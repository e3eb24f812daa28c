//! Configuration file
//!
//! JSON, every field optional:
//!
//! ```json
//! {
//!   "data_path": "./data/employees.json",
//!   "page_size": 20,
//!   "export_file": "employee-data.csv",
//!   "currency_symbol": "$",
//!   "date_format": "%-m/%-d/%Y",
//!   "crlf": false,
//!   "log_level": "info"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::export::{ExportOptions, LineEnding, DEFAULT_EXPORT_FILE};
use crate::observability::Severity;
use crate::schema::DisplayLocale;
use crate::view::PageSize;

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "./rosterview.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Employee dataset; required unless `--data` is given
    #[serde(default)]
    pub data_path: Option<PathBuf>,

    /// Initial rows per page (default 20)
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Export file name (default "employee-data.csv")
    #[serde(default = "default_export_file")]
    pub export_file: PathBuf,

    /// Currency prefix (default "$")
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// chrono strftime pattern for dates (default "%-m/%-d/%Y")
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Terminate export lines with CRLF instead of LF
    #[serde(default)]
    pub crlf: bool,

    /// Minimum log severity: trace, info, warn or error (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_page_size() -> usize {
    PageSize::default().get()
}
fn default_export_file() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_FILE)
}
fn default_currency_symbol() -> String {
    DisplayLocale::default().currency_symbol
}
fn default_date_format() -> String {
    DisplayLocale::default().date_format
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: None,
            page_size: default_page_size(),
            export_file: default_export_file(),
            currency_symbol: default_currency_symbol(),
            date_format: default_date_format(),
            crlf: false,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Parse and validate configuration JSON
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Loads `path` if given; otherwise the default file if it exists,
    /// falling back to built-in defaults.
    pub fn resolve(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> CliResult<()> {
        PageSize::try_from(self.page_size).map_err(|_| {
            CliError::config_error(format!(
                "Invalid page_size: {}. Must be one of 10, 20, 50, 100.",
                self.page_size
            ))
        })?;

        if self.export_file.as_os_str().is_empty() {
            return Err(CliError::config_error("export_file must not be empty"));
        }

        if self.date_format.is_empty()
            || StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error))
        {
            return Err(CliError::config_error(format!(
                "Invalid date_format: '{}'",
                self.date_format
            )));
        }

        self.min_severity()?;

        Ok(())
    }

    /// Minimum severity for the logger
    pub fn min_severity(&self) -> CliResult<Severity> {
        self.log_level.parse().map_err(|e: String| {
            CliError::config_error(format!("Invalid log_level: {}", e))
        })
    }

    /// Initial page size
    pub fn page_size(&self) -> CliResult<PageSize> {
        PageSize::try_from(self.page_size)
            .map_err(|e| CliError::config_error(e.to_string()))
    }

    /// Display locale for the schema registry
    pub fn locale(&self) -> DisplayLocale {
        DisplayLocale {
            currency_symbol: self.currency_symbol.clone(),
            date_format: self.date_format.clone(),
            ..DisplayLocale::default()
        }
    }

    /// Options for the CSV exporter
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            line_ending: if self.crlf {
                LineEnding::CrLf
            } else {
                LineEnding::Lf
            },
            ..ExportOptions::default()
        }
    }

    /// Dataset path: the override if given, else `data_path`
    pub fn resolve_data_path(&self, data_override: Option<&Path>) -> CliResult<PathBuf> {
        data_override
            .map(Path::to_path_buf)
            .or_else(|| self.data_path.clone())
            .ok_or_else(|| {
                CliError::config_error("No dataset: pass --data or set data_path in the config")
            })
    }
}
