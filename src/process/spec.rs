//! process::spec
//!
//! The launch spec: everything needed to start the server process.
//!
//! A spec is plain data. Building one has no side effects; only a
//! [`super::ProcessSpawner`] turns it into a running process.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::core::types::EnvAssignment;

/// Program, arguments, working directory and environment of the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchSpec {
    /// Working directory of the child (the service root).
    pub cwd: PathBuf,
    /// Program to run.
    pub program: String,
    /// Arguments after the program.
    pub args: Vec<String>,
    /// Variables set in the child environment.
    pub env: Vec<EnvAssignment>,
    /// Inherited variables removed from the child environment.
    pub env_remove: Vec<String>,
}

impl LaunchSpec {
    /// Value assigned to `key`, if any.
    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }

    /// Program and arguments joined for display.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for LaunchSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "cwd: {}", self.cwd.display())?;
        writeln!(f, "command: {}", self.command_line())?;
        for assignment in &self.env {
            writeln!(f, "env: {}", assignment)?;
        }
        for key in &self.env_remove {
            writeln!(f, "unset: {}", key)?;
        }
        Ok(())
    }
}
