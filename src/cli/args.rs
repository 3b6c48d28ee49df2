//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Flags
//!
//! - `--config` / `-c <path>`: Private environment file
//! - `--data-source-dir` / `-d <path>`: Mock data source directory
//! - `--live` / `-l`, `--mock` / `-m`: Run mode (mutually exclusive)
//! - `--help` / `-h`, `--version` / `-V`
//!
//! Everything after `--` is passed to the server.

use clap::Parser;
use std::path::PathBuf;

use crate::core::types::RunMode;

/// gql-bootstrap - Stage mock data sources and start a GraphQL service
#[derive(Parser, Debug)]
#[command(name = "gql-bootstrap")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    # Offline development against a local data source
    gql-bootstrap --mock --data-source-dir ./fixtures/mock

    # Production run with private credentials
    gql-bootstrap --live --config ./private.env

    # Show what would be launched, without starting the server
    gql-bootstrap --mock -d ./fixtures/mock --dry-run

    # Pass arguments through to the server
    gql-bootstrap --mock -- --port 4000")]
pub struct Cli {
    /// Private environment file, exported as APP_ENV_PRIVATE
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Mock data source directory (must contain src/)
    #[arg(short, long, value_name = "PATH")]
    pub data_source_dir: Option<PathBuf>,

    /// Run against live upstream data sources (requires --config)
    #[arg(short, long, conflicts_with = "mock")]
    pub live: bool,

    /// Run offline (the default)
    #[arg(short, long)]
    pub mock: bool,

    /// Directory to run the server in [default: current directory]
    #[arg(long, value_name = "PATH")]
    pub service_root: Option<PathBuf>,

    /// Where staged data sources are written
    #[arg(long, value_name = "PATH")]
    pub scratch_dir: Option<PathBuf>,

    /// Stage and print the launch spec, but do not start the server
    #[arg(long)]
    pub dry_run: bool,

    /// Print the dry-run launch spec as JSON
    #[arg(long, requires = "dry_run")]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL", exclusive = true)]
    pub completions: Option<Shell>,

    /// Arguments passed to the server
    #[arg(last = true, value_name = "SERVER_ARGS")]
    pub server_args: Vec<String>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// The selected run mode. Neither flag means mock.
    pub fn run_mode(&self) -> RunMode {
        RunMode::from_flags(self.live, self.mock)
    }
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
