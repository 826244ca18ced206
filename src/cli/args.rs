//! CLI argument definitions using clap
//!
//! Commands:
//! - deepreason serve [--config <path>] [--port <n>]
//! - deepreason process [--config <path>]
//! - deepreason batch [--config <path>]
//! - deepreason config [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Deep Reason - symbolic reasoning over object detection events
#[derive(Parser, Debug)]
#[command(name = "deepreason")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port override (takes precedence over file and environment)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Process one event read from stdin
    Process {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Process a JSON array of events read from stdin
    Batch {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
