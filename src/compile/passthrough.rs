//! compile::passthrough
//!
//! Compiler that returns module source unchanged.
//!
//! Used when `[compiler] passthrough = true`, for data sources whose
//! modules already run as-is. Reads go through the [`FileSystem`]
//! capability like every other staging access.

use std::path::Path;

use super::traits::{CompileError, ModuleCompiler};
use crate::fs::{FileSystem, LocalFileSystem};

#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughCompiler<F = LocalFileSystem> {
    fs: F,
}

impl PassthroughCompiler<LocalFileSystem> {
    /// Passthrough over the local file system.
    pub fn new() -> Self {
        Self {
            fs: LocalFileSystem,
        }
    }
}

impl<F: FileSystem> PassthroughCompiler<F> {
    pub fn with_fs(fs: F) -> Self {
        Self { fs }
    }
}

impl<F: FileSystem> ModuleCompiler for PassthroughCompiler<F> {
    fn compile(&self, source: &Path) -> Result<String, CompileError> {
        let bytes = self.fs.read_file(source).map_err(|e| CompileError::Read {
            file: source.to_path_buf(),
            source: e,
        })?;
        String::from_utf8(bytes).map_err(|_| CompileError::InvalidOutput {
            file: source.to_path_buf(),
        })
    }

    fn name(&self) -> &str {
        "passthrough"
    }
}
