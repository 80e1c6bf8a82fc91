//! CLI module
//!
//! Command-line interface for one-shot invocations. Scheduling is
//! external; each run does its work and exits.
//!
//! # Commands
//!
//! - `check` - Validate configuration and token availability
//! - `lookup` - Build a lookup table from a tabular-database table
//! - `jobs` - Search the job-management API

mod commands;
mod runner;

pub use commands::{Cli, Commands, StatusArg};
pub use runner::Runner;
