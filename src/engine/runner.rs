//! engine::runner
//!
//! Engine runner - the single entry point for a bootstrap run.
//!
//! # Architecture
//!
//! ```text
//! Gate -> [Stage if mock] -> Compose env -> Build launch spec -> Launch
//! ```
//!
//! **Key principle:** Nothing is staged or spawned before the gate passes.
//! A run is a single linear pass; there are no retries.
//!
//! # Invariants
//!
//! - A failed gate returns before any file-system write or spawn
//! - Live runs never stage a data source
//! - The launch spec is fully computed before the spawner is called
//! - A dry run stops after building the launch spec
//!
//! # Example
//!
//! ```
//! use gql_bootstrap::compile::MockCompiler;
//! use gql_bootstrap::core::types::{DataSourceLayout, RunMode};
//! use gql_bootstrap::engine::runner::{run, Capabilities, RunError, RunRequest};
//! use gql_bootstrap::fs::MemoryFileSystem;
//! use gql_bootstrap::process::RecordingSpawner;
//! use gql_bootstrap::ui::output::Verbosity;
//! use std::path::PathBuf;
//!
//! let fs = MemoryFileSystem::new();
//! let compiler = MockCompiler::new();
//! let spawner = RecordingSpawner::new();
//! let caps = Capabilities { fs: &fs, compiler: &compiler, spawner: &spawner };
//!
//! let request = RunRequest {
//!     mode: RunMode::Live,
//!     config: None,
//!     data_source_dir: None,
//!     service_root: PathBuf::from("/srv/orders"),
//!     scratch_dir: PathBuf::from("/tmp/scratch"),
//!     server_command: vec!["node".into(), "dist/server.js".into()],
//!     server_args: vec![],
//!     layout: DataSourceLayout::default(),
//!     dry_run: false,
//! };
//!
//! assert!(matches!(run(&request, &caps, Verbosity::Quiet), Err(RunError::Gate(_))));
//! assert!(spawner.launches().is_empty());
//! ```

use std::path::PathBuf;

use thiserror::Error;

use super::env;
use super::gate::{gate, GateError};
use super::launch::{build_launch_spec, launch, LaunchError, LaunchSpec};
use super::stage::{SkipReason, StageError, StageOutcome, Stager};
use crate::compile::ModuleCompiler;
use crate::core::types::{DataSourceLayout, RunMode};
use crate::fs::FileSystem;
use crate::process::{ProcessSpawner, SpawnError};
use crate::ui::output::{self, Verbosity};

/// Errors from a bootstrap run.
#[derive(Debug, Error)]
pub enum RunError {
    /// The mode gate refused the run.
    #[error(transparent)]
    Gate(#[from] GateError),

    /// Staging the data source failed.
    #[error("staging failed: {0}")]
    Stage(#[from] StageError),

    /// The launch spec could not be built.
    #[error(transparent)]
    Launch(#[from] LaunchError),

    /// The server could not be started.
    #[error(transparent)]
    Spawn(#[from] SpawnError),
}

impl RunError {
    /// Check if the gate refused the run.
    pub fn is_gate(&self) -> bool {
        matches!(self, RunError::Gate(_))
    }
}

/// Everything one run needs, with paths already absolute.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub mode: RunMode,
    /// Private config file, as given.
    pub config: Option<PathBuf>,
    /// Mock data source directory, as given.
    pub data_source_dir: Option<PathBuf>,
    /// Working directory of the server.
    pub service_root: PathBuf,
    pub scratch_dir: PathBuf,
    /// Program and arguments of the server.
    pub server_command: Vec<String>,
    /// Extra arguments passed through to the server.
    pub server_args: Vec<String>,
    pub layout: DataSourceLayout,
    /// Build the launch spec but do not spawn.
    pub dry_run: bool,
}

/// The capabilities a run works through.
#[derive(Clone, Copy)]
pub struct Capabilities<'a> {
    pub fs: &'a dyn FileSystem,
    pub compiler: &'a dyn ModuleCompiler,
    pub spawner: &'a dyn ProcessSpawner,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The server ran and exited.
    Launched { exit_code: i32 },
    /// Dry run: the launch spec that would have been launched.
    DryRun(LaunchSpec),
}

/// Run the bootstrap pipeline.
///
/// # Errors
///
/// Returns the first failing step's error. Nothing after it runs.
pub fn run(
    request: &RunRequest,
    caps: &Capabilities<'_>,
    verbosity: Verbosity,
) -> Result<RunOutcome, RunError> {
    tracing::debug!(mode = %request.mode, dry_run = request.dry_run, "run started");

    let pass = gate(request.mode, request.config.as_deref(), caps.fs)?;
    for warning in &pass.warnings {
        output::warn(warning, verbosity);
    }

    let staged = stage(request, caps, verbosity)?;

    let env = env::compose(pass.mode, staged.paths(), pass.config.as_ref());
    let spec = build_launch_spec(
        &request.service_root,
        &request.server_command,
        &request.server_args,
        env,
    )?;

    if request.dry_run {
        return Ok(RunOutcome::DryRun(spec));
    }

    let exit_code = launch(&spec, caps.spawner)?;
    Ok(RunOutcome::Launched { exit_code })
}

fn stage(
    request: &RunRequest,
    caps: &Capabilities<'_>,
    verbosity: Verbosity,
) -> Result<StageOutcome, StageError> {
    let source = request
        .data_source_dir
        .as_deref()
        .filter(|p| !p.as_os_str().is_empty());

    if let (RunMode::Live, Some(dir)) = (request.mode, source) {
        let reason = SkipReason::LiveMode(dir.to_path_buf());
        output::warn(&reason, verbosity);
        return Ok(StageOutcome::Skipped(reason));
    }

    Stager::new(caps.fs, caps.compiler, &request.layout, verbosity)
        .protecting(&request.service_root)
        .stage(source, &request.scratch_dir)
}
