//! compile
//!
//! Module compile capability.
//!
//! # Architecture
//!
//! Source modules of a mock data source are compiled through the
//! `ModuleCompiler` trait, which has multiple implementations:
//!
//! - [`CommandCompiler`]: Runs an external toolchain command (default)
//! - [`PassthroughCompiler`]: Returns the source unchanged
//! - [`MockCompiler`]: Deterministic output for tests
//!
//! # Compiler Selection
//!
//! Use [`create_compiler`] to build one from configuration:
//!
//! ```
//! use gql_bootstrap::compile::{create_compiler, CompilerSettings};
//!
//! let settings = CompilerSettings {
//!     command: vec!["npx".into(), "babel".into(), "{input}".into()],
//!     passthrough: false,
//! };
//! let compiler = create_compiler(&settings).unwrap();
//! assert_eq!(compiler.name(), "npx");
//! ```

mod command;
mod mock;
mod passthrough;
mod traits;

pub use command::{CommandCompiler, INPUT_PLACEHOLDER};
pub use mock::MockCompiler;
pub use passthrough::PassthroughCompiler;
pub use traits::{CompileError, ModuleCompiler};

use thiserror::Error;

/// Resolved compiler configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerSettings {
    /// Program and arguments.
    pub command: Vec<String>,
    /// Skip compilation and stage modules as-is.
    pub passthrough: bool,
}

/// Errors from compiler selection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompilerSelectError {
    #[error("compiler command is empty (set [compiler] command or passthrough = true)")]
    EmptyCommand,
}

/// Create a compiler from settings.
///
/// # Errors
///
/// Returns an error if compilation is enabled but no command is set.
pub fn create_compiler(
    settings: &CompilerSettings,
) -> Result<Box<dyn ModuleCompiler>, CompilerSelectError> {
    if settings.passthrough {
        return Ok(Box::new(PassthroughCompiler::new()));
    }
    CommandCompiler::new(&settings.command)
        .map(|c| Box::new(c) as Box<dyn ModuleCompiler>)
        .ok_or(CompilerSelectError::EmptyCommand)
}
