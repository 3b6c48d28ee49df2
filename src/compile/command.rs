//! compile::command
//!
//! Compiler backed by an external command.
//!
//! The command receives the source file path and prints the compiled
//! module to stdout. An argument containing `{input}` has the placeholder
//! replaced by the path; without a placeholder the path is appended.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use super::traits::{CompileError, ModuleCompiler};

/// Placeholder replaced by the source file path.
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// Runs a configured program once per module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCompiler {
    program: String,
    args: Vec<String>,
}

impl CommandCompiler {
    /// Build from a `[program, args...]` list.
    ///
    /// Returns `None` for an empty list.
    pub fn new(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments for compiling `source`.
    pub fn args_for(&self, source: &Path) -> Vec<OsString> {
        let has_placeholder = self.args.iter().any(|a| a.contains(INPUT_PLACEHOLDER));
        let input = source.to_string_lossy();

        let mut args: Vec<OsString> = self
            .args
            .iter()
            .map(|arg| {
                if arg == INPUT_PLACEHOLDER {
                    source.as_os_str().to_os_string()
                } else {
                    OsString::from(arg.replace(INPUT_PLACEHOLDER, &input))
                }
            })
            .collect();

        if !has_placeholder {
            args.push(source.as_os_str().to_os_string());
        }
        args
    }
}

impl ModuleCompiler for CommandCompiler {
    fn compile(&self, source: &Path) -> Result<String, CompileError> {
        tracing::debug!(program = %self.program, file = %source.display(), "compiling module");

        let output = Command::new(&self.program)
            .args(self.args_for(source))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| CompileError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(CompileError::Failed {
                file: source.to_path_buf(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| CompileError::InvalidOutput {
            file: source.to_path_buf(),
        })
    }

    fn name(&self) -> &str {
        &self.program
    }
}
