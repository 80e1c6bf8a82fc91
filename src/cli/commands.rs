//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// tabsync - sync paginated API records into tabular sheets
#[derive(Debug, Parser)]
#[command(name = "tabsync", version, about)]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, short, default_value = "tabsync.yaml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate configuration and token availability
    Check,

    /// Build a lookup table from a table and print it as JSON
    Lookup {
        /// Table identifier
        table: String,

        /// Field id to project as the lookup value
        #[arg(long)]
        field: String,

        /// Field id to key by (defaults to the record id)
        #[arg(long)]
        key: Option<String>,

        /// Cache TTL in seconds; zero bypasses the cache read.
        /// Defaults to the configured cache TTL.
        #[arg(long)]
        ttl: Option<i64>,
    },

    /// Search jobs and print them as JSON
    Jobs {
        /// Which status class to fetch
        #[arg(long, value_enum, default_value_t)]
        status: StatusArg,

        /// For archived jobs, how many days back to look
        #[arg(long, default_value_t = 30)]
        since_days: i64,
    },
}

/// Job status classes as a CLI argument
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum StatusArg {
    /// Jobs still on the board
    #[default]
    Active,
    /// Archived jobs only
    Archived,
    /// Every status
    All,
}
