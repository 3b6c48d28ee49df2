//! process::system
//!
//! Spawner backed by `std::process::Command`.
//!
//! The child inherits stdin/stdout/stderr and the parent's environment,
//! minus `env_remove` and plus `env`. The bootstrapper blocks until the
//! child exits, so an operator interrupt reaches both through the
//! terminal's process group.

use std::process::{Command, ExitStatus};

use super::spec::LaunchSpec;
use super::traits::{ProcessSpawner, SpawnError};

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSpawner;

impl SystemSpawner {
    /// Build the `Command` for a spec without running it.
    pub fn command(spec: &LaunchSpec) -> Command {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args).current_dir(&spec.cwd);
        for key in &spec.env_remove {
            cmd.env_remove(key);
        }
        for assignment in &spec.env {
            cmd.env(&assignment.key, &assignment.value);
        }
        cmd
    }
}

impl ProcessSpawner for SystemSpawner {
    fn run(&self, spec: &LaunchSpec) -> Result<i32, SpawnError> {
        tracing::debug!(
            program = %spec.program,
            cwd = %spec.cwd.display(),
            "spawning server"
        );

        let mut child = Self::command(spec)
            .spawn()
            .map_err(|e| SpawnError::Start {
                program: spec.program.clone(),
                cwd: spec.cwd.clone(),
                source: e,
            })?;

        let status = child.wait().map_err(|e| SpawnError::Wait {
            program: spec.program.clone(),
            source: e,
        })?;

        let code = exit_code(status);
        tracing::debug!(code, "server exited");
        Ok(code)
    }
}

/// Exit code of a finished child; signal deaths map to 128 + signal.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
