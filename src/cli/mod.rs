//! cli
//!
//! Command-line interface layer for gql-bootstrap.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and resolve them against the invocation
//!   directory
//! - Load the bootstrapper's own configuration
//! - Hand a [`RunRequest`] with real capabilities to [`crate::engine`]
//! - Map the outcome to an exit code
//!
//! # Architecture
//!
//! The CLI layer is thin. It never stages files or spawns processes
//! itself; all of that flows through [`engine::run`].

pub mod args;
pub mod completion;

pub use args::{Cli, Shell};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::compile::{create_compiler, CompilerSettings};
use crate::core::config::Config;
use crate::core::paths;
use crate::core::types::{DataSourceLayout, GQL_DATA_SOURCES};
use crate::engine::{self, Capabilities, LaunchSpec, RunError, RunOutcome, RunRequest};
use crate::fs::LocalFileSystem;
use crate::process::SystemSpawner;
use crate::runtime::DataSourceCatalog;
use crate::ui::logging;
use crate::ui::output::{self, Verbosity};

/// Exit code for fatal errors.
pub const EXIT_FAILURE: i32 = 1;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`. Returns the exit
/// code: the server's own code after a launch, 0 for a dry run, 1 when the
/// mode gate refuses the run.
pub fn run() -> Result<i32> {
    let cli = Cli::parse_args();

    if let Some(shell) = cli.completions {
        completion::write_completion(shell, &mut std::io::stdout().lock())?;
        return Ok(0);
    }

    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    logging::init(verbosity);

    let invocation_dir =
        std::env::current_dir().context("failed to determine the current directory")?;
    let (request, compiler_settings) = build_request(&cli, &invocation_dir, verbosity)?;
    let compiler = create_compiler(&compiler_settings)?;
    let fs = LocalFileSystem;
    let spawner = SystemSpawner;
    let caps = Capabilities {
        fs: &fs,
        compiler: compiler.as_ref(),
        spawner: &spawner,
    };

    // Keep stdout clean for the JSON report.
    let run_verbosity = if cli.json { Verbosity::Quiet } else { verbosity };

    match engine::run(&request, &caps, run_verbosity) {
        Ok(RunOutcome::Launched { exit_code }) => Ok(exit_code),
        Ok(RunOutcome::DryRun(spec)) => {
            print_dry_run(&spec, &request.layout, cli.json)?;
            Ok(0)
        }
        Err(RunError::Gate(err)) => {
            if let Some(warning) = err.warning() {
                output::warn(warning, run_verbosity);
            }
            output::error(&err);
            eprintln!("\n{}", err.usage_hint());
            Ok(EXIT_FAILURE)
        }
        Err(err) => Err(err).context("bootstrap failed"),
    }
}

/// Resolve flags and configuration into a run request and the module
/// compiler settings.
///
/// Relative `--config`, `--data-source-dir`, `--service-root` and
/// `--scratch-dir` values are taken relative to `invocation_dir`.
pub fn build_request(
    cli: &Cli,
    invocation_dir: &Path,
    verbosity: Verbosity,
) -> Result<(RunRequest, CompilerSettings)> {
    let resolve = |path: &PathBuf| paths::resolve(invocation_dir, path);

    let service_root = cli
        .service_root
        .as_ref()
        .map(resolve)
        .unwrap_or_else(|| paths::normalize(invocation_dir));

    let loaded = Config::load(&service_root).context("failed to load gql-bootstrap config")?;
    for warning in &loaded.warnings {
        output::warn(
            format!("{} ({})", warning.message, warning.path.display()),
            verbosity,
        );
    }
    let config = loaded.config;

    let scratch_dir = cli
        .scratch_dir
        .as_ref()
        .map(resolve)
        .unwrap_or_else(|| config.scratch_dir(&service_root));

    let request = RunRequest {
        mode: cli.run_mode(),
        config: cli.config.as_ref().map(resolve),
        data_source_dir: cli
            .data_source_dir
            .as_ref()
            .filter(|p| !p.as_os_str().is_empty())
            .map(resolve),
        service_root,
        scratch_dir,
        server_command: config.server_command(),
        server_args: cli.server_args.clone(),
        layout: config.layout(),
        dry_run: cli.dry_run,
    };
    Ok((request, config.compiler()))
}

#[derive(Serialize)]
struct DryRunReport<'a> {
    launch: &'a LaunchSpec,
    data_sources: Option<DataSourceCatalog>,
}

fn print_dry_run(spec: &LaunchSpec, layout: &DataSourceLayout, json: bool) -> Result<()> {
    let catalog = spec
        .env_value(GQL_DATA_SOURCES)
        .map(|dir| DataSourceCatalog::load(Path::new(dir), &LocalFileSystem, layout))
        .transpose()
        .context("failed to list staged data sources")?;

    if json {
        let report = DryRunReport {
            launch: spec,
            data_sources: catalog,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", spec);
        if let Some(catalog) = catalog {
            print!("{}", catalog);
        }
    }
    Ok(())
}
