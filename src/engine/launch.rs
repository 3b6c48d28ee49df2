//! engine::launch
//!
//! Process launching.
//!
//! Launching is split in two:
//!
//! 1. [`build_launch_spec`] - pure, computes working directory, program,
//!    arguments and environment
//! 2. [`launch`] - applies the launch spec once, through a [`ProcessSpawner`]
//!
//! The bootstrapper never changes its own working directory or
//! environment. The caller's lifetime is bound to the server's: `launch`
//! blocks until the server exits and returns its exit code.

use std::path::Path;

use thiserror::Error;

use super::env;
use crate::core::types::EnvAssignment;
use crate::process::{ProcessSpawner, SpawnError};

pub use crate::process::LaunchSpec;

/// Errors from building a launch spec.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LaunchError {
    #[error("server command is empty (set [server] command in gql-bootstrap.toml)")]
    EmptyCommand,
}

/// Build the launch spec for the server.
///
/// `server_command` is program plus arguments; `extra_args` are appended.
/// Managed variables missing from `env` are listed for removal.
///
/// # Example
///
/// ```
/// use gql_bootstrap::core::types::EnvAssignment;
/// use gql_bootstrap::engine::launch::build_launch_spec;
/// use std::path::Path;
///
/// let command = vec!["node".to_string(), "dist/server.js".to_string()];
/// let env = vec![EnvAssignment::new("NODE_ENV", "production")];
/// let spec = build_launch_spec(Path::new("/srv/orders"), &command, &[], env).unwrap();
///
/// assert_eq!(spec.program, "node");
/// assert_eq!(spec.args, vec!["dist/server.js"]);
/// assert_eq!(spec.env_remove, vec!["GQL_DATA_SOURCES", "APP_ENV_PRIVATE"]);
/// ```
pub fn build_launch_spec(
    service_root: &Path,
    server_command: &[String],
    extra_args: &[String],
    env: Vec<EnvAssignment>,
) -> Result<LaunchSpec, LaunchError> {
    let (program, args) = server_command
        .split_first()
        .filter(|(program, _)| !program.trim().is_empty())
        .ok_or(LaunchError::EmptyCommand)?;

    let env_remove = env::unset_keys(&env);

    Ok(LaunchSpec {
        cwd: service_root.to_path_buf(),
        program: program.clone(),
        args: args.iter().chain(extra_args).cloned().collect(),
        env,
        env_remove,
    })
}

/// Run the server described by `spec` and return its exit code.
pub fn launch(spec: &LaunchSpec, spawner: &dyn ProcessSpawner) -> Result<i32, SpawnError> {
    tracing::info!(command = %spec.command_line(), "launching server");
    spawner.run(spec)
}
