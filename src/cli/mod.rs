//! CLI module for orderstream
//!
//! Provides:
//! - list: print the report catalogue
//! - run: execute one report against the configured snapshot
//! - discount: reprice one category in a loaded copy of the snapshot

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{discount, execute, list, run, run_command, run_report, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
