//! CLI argument definitions using clap
//!
//! Commands:
//! - rosterview columns [--config <path>] [--data <path>]
//! - rosterview summary [--config <path>] [--data <path>]
//! - rosterview view    [...] [--search Q] [--filter EXPR]... [--sort KEY [--desc]] [--page N] [--page-size N]
//! - rosterview export  [...] [--search Q] [--filter EXPR]... [--sort KEY [--desc]] [--out <path>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// rosterview - filter, sort, page and export employee records
#[derive(Parser, Debug)]
#[command(name = "rosterview")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where the configuration and dataset come from
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Path to configuration file (default: ./rosterview.json if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to the employee dataset, overrides `data_path` from the config
    #[arg(long)]
    pub data: Option<PathBuf>,
}

/// Quick-search, filters and sort shared by `view` and `export`
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Quick-search text matched against every searchable column
    #[arg(long, default_value = "")]
    pub search: String,

    /// Column filter, e.g. `salary=50000..80000`, `department=Eng|Sales`,
    /// `position~lead`; repeat to combine
    #[arg(long = "filter", value_name = "EXPR")]
    pub filters: Vec<String>,

    /// Column key to sort by
    #[arg(long, value_name = "KEY")]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the columns with their types, filter kinds and options
    Columns {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print summary statistics over the whole dataset
    Summary {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print one page of the filtered and sorted view
    View {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        query: QueryArgs,

        /// Page index, starting at 0; past the end shows the last page
        #[arg(long, default_value_t = 0)]
        page: usize,

        /// Rows per page: 10, 20, 50 or 100 (default: from config)
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Write the whole filtered and sorted view as CSV
    Export {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        query: QueryArgs,

        /// Output file (default: `export_file` from the config)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
