//! CLI module for elimindex
//!
//! Provides command-line interface for:
//! - query: One-shot range query
//! - inspect: Index statistics
//! - dump: Tree structure

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{dump, inspect, parse_bbox, query, run, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_response, write_text};
