//! CLI module for rosterview
//!
//! Provides command-line interface for:
//! - columns: Column declarations and set-filter options
//! - summary: Dataset-wide statistics
//! - view: One page of the filtered and sorted view
//! - export: CSV export of the filtered and sorted view

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, QueryArgs, SourceArgs};
pub use commands::{columns, export, run, run_command, summary, view};
pub use config::{Config, DEFAULT_CONFIG_PATH};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
