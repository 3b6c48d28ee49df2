//! compile::mock
//!
//! Mock compiler for deterministic testing.
//!
//! # Design
//!
//! Output is derived from the file name only, so tests do not need the
//! source file to exist on disk. Every call is recorded, and a single file
//! can be configured to fail.
//!
//! # Example
//!
//! ```
//! use gql_bootstrap::compile::{MockCompiler, ModuleCompiler};
//! use std::path::Path;
//!
//! let compiler = MockCompiler::new();
//! let text = compiler.compile(Path::new("/ds/src/b.js")).unwrap();
//! assert_eq!(text, "// compiled: b.js\n");
//! assert_eq!(compiler.calls().len(), 1);
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::traits::{CompileError, ModuleCompiler};

/// Mock compiler for testing.
///
/// Clones share recorded calls.
#[derive(Debug, Clone, Default)]
pub struct MockCompiler {
    inner: Arc<Mutex<MockCompilerInner>>,
}

#[derive(Debug, Default)]
struct MockCompilerInner {
    /// Files passed to `compile`, in order.
    calls: Vec<PathBuf>,
    /// File name that fails to compile.
    fail_on: Option<String>,
}

impl MockCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make compiling the file with this name fail.
    pub fn fail_on(self, file_name: &str) -> Self {
        self.lock().fail_on = Some(file_name.to_string());
        self
    }

    /// Files compiled so far.
    pub fn calls(&self) -> Vec<PathBuf> {
        self.lock().calls.clone()
    }

    /// The text produced for a file name.
    pub fn expected_output(file_name: &str) -> String {
        format!("// compiled: {}\n", file_name)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockCompilerInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ModuleCompiler for MockCompiler {
    fn compile(&self, source: &Path) -> Result<String, CompileError> {
        let mut inner = self.lock();
        inner.calls.push(source.to_path_buf());

        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if inner.fail_on.as_deref() == Some(name.as_str()) {
            return Err(CompileError::Failed {
                file: source.to_path_buf(),
                status: "exit status: 1".to_string(),
                stderr: "mock compile failure".to_string(),
            });
        }

        Ok(Self::expected_output(&name))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
