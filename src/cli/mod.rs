//! CLI module for the reasoning service
//!
//! Provides command-line interface for:
//! - serve: Run the HTTP API
//! - process: One-shot single event from stdin
//! - batch: One-shot event array from stdin
//! - config: Print the effective configuration

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{batch, load_config, process, run, run_command, serve, show_config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_json, read_request, write_envelope, write_response};
