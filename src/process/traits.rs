//! process::traits
//!
//! Process spawner trait definition.

use thiserror::Error;

use super::spec::LaunchSpec;

/// Errors from spawning the server.
#[derive(Debug, Error)]
pub enum SpawnError {
    /// The program could not be started.
    #[error("failed to start '{program}' in '{}': {source}", .cwd.display())]
    Start {
        program: String,
        cwd: std::path::PathBuf,
        source: std::io::Error,
    },

    /// Waiting on the child failed.
    #[error("lost track of '{program}': {source}")]
    Wait {
        program: String,
        source: std::io::Error,
    },
}

/// Trait for starting the server process.
///
/// Implementations apply the launch spec's working directory and environment to
/// the child only, never to the calling process.
pub trait ProcessSpawner {
    /// Run the process to completion and return its exit code.
    fn run(&self, spec: &LaunchSpec) -> Result<i32, SpawnError>;
}
