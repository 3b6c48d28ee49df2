//! compile::traits
//!
//! Module compiler trait definition.
//!
//! # Design
//!
//! Compiling a resolver module is an opaque capability: a source file goes
//! in, runnable module text comes out. The stager never knows which
//! toolchain sits behind the trait.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::fs::FsError;

/// Errors from module compilation.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The compiler program could not be started.
    #[error("failed to start compiler '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// The compiler ran and reported failure.
    #[error("compiler failed on '{}' ({status}): {stderr}", .file.display())]
    Failed {
        file: PathBuf,
        status: String,
        stderr: String,
    },

    /// The compiler produced output that is not UTF-8 text.
    #[error("compiler output for '{}' is not valid UTF-8", .file.display())]
    InvalidOutput { file: PathBuf },

    /// The source file could not be read.
    #[error("failed to read module '{}': {source}", .file.display())]
    Read { file: PathBuf, source: FsError },
}

/// Trait for module compilers.
///
/// # Example
///
/// ```
/// use gql_bootstrap::compile::{ModuleCompiler, PassthroughCompiler};
/// use gql_bootstrap::fs::MemoryFileSystem;
/// use std::path::Path;
///
/// let fs = MemoryFileSystem::new().with_file("/ds/src/resolvers.js", "export {};");
/// let compiler = PassthroughCompiler::with_fs(fs);
///
/// let text = compiler.compile(Path::new("/ds/src/resolvers.js")).unwrap();
/// assert_eq!(text, "export {};");
/// ```
pub trait ModuleCompiler {
    /// Compile one source module and return the runnable text.
    fn compile(&self, source: &Path) -> Result<String, CompileError>;

    /// Short name for progress output.
    fn name(&self) -> &str;
}
