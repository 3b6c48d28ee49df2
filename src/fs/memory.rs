//! fs::memory
//!
//! In-memory file system for deterministic testing.
//!
//! # Design
//!
//! Directories and files live in ordered maps keyed by absolute path.
//! Parent directories are created implicitly when a file is added through
//! the builder methods. One path can be configured to fail on write or
//! copy, to exercise the stager's abort path.
//!
//! # Example
//!
//! ```
//! use gql_bootstrap::fs::{FileSystem, MemoryFileSystem};
//! use std::path::Path;
//!
//! let fs = MemoryFileSystem::new().with_file("/ds/src/a.graphql", "type Query { a: Int }");
//!
//! assert!(fs.is_dir(Path::new("/ds/src")));
//! assert_eq!(fs.list_files(Path::new("/ds/src")).unwrap().len(), 1);
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::traits::{FileSystem, FsError};

/// In-memory file system.
///
/// Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, Vec<u8>>,
    /// Files that exist but cannot be read.
    unreadable: BTreeSet<PathBuf>,
    /// Destination path whose write or copy fails.
    fail_on_write: Option<PathBuf>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file (and its parent directories).
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl AsRef<[u8]>) -> Self {
        {
            let mut inner = self.lock();
            let path = path.into();
            inner.add_parents(&path);
            inner.files.insert(path, contents.as_ref().to_vec());
        }
        self
    }

    /// Add an empty directory (and its parents).
    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        {
            let mut inner = self.lock();
            let path = path.into();
            inner.add_parents(&path);
            inner.dirs.insert(path);
        }
        self
    }

    /// Add a file that exists but cannot be opened.
    pub fn with_unreadable_file(self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let fs = self.with_file(path.clone(), b"");
        fs.lock().unreadable.insert(path);
        fs
    }

    /// Make writing or copying to this path fail.
    pub fn fail_on_write(self, path: impl Into<PathBuf>) -> Self {
        self.lock().fail_on_write = Some(path.into());
        self
    }

    /// Contents of a file, if present.
    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        self.lock().files.get(path).cloned()
    }

    /// Every file at any depth under `dir`, sorted.
    pub fn files_under(&self, dir: &Path) -> Vec<PathBuf> {
        self.lock()
            .files
            .keys()
            .filter(|p| p.starts_with(dir))
            .cloned()
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl MemoryInner {
    fn add_parents(&mut self, path: &Path) {
        let mut parent = path.parent();
        while let Some(dir) = parent {
            if dir.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(dir.to_path_buf());
            parent = dir.parent();
        }
    }

    fn check_writable(&self, path: &Path, op: &'static str) -> Result<(), FsError> {
        if self.fail_on_write.as_deref() == Some(path) {
            return Err(FsError::io(
                op,
                path,
                io::Error::new(io::ErrorKind::PermissionDenied, "injected failure"),
            ));
        }
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !self.dirs.contains(parent) => {
                Err(FsError::io(op, path, not_found()))
            }
            _ => Ok(()),
        }
    }
}

fn not_found() -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, "no such file or directory")
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let inner = self.lock();
        inner.dirs.contains(path) || inner.files.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.lock().dirs.contains(path)
    }

    fn is_readable_file(&self, path: &Path) -> bool {
        let inner = self.lock();
        inner.files.contains_key(path) && !inner.unreadable.contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), FsError> {
        let mut inner = self.lock();
        if inner.files.contains_key(path) {
            return Err(FsError::io(
                "create directory",
                path,
                io::Error::new(io::ErrorKind::AlreadyExists, "file exists"),
            ));
        }
        inner.add_parents(path);
        inner.dirs.insert(path.to_path_buf());
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> Result<(), FsError> {
        let mut inner = self.lock();
        if inner.files.remove(path).is_some() {
            return Ok(());
        }
        if !inner.dirs.contains(path) {
            return Err(FsError::io("remove directory", path, not_found()));
        }
        inner.dirs.retain(|d| !d.starts_with(path));
        inner.files.retain(|f, _| !f.starts_with(path));
        inner.unreadable.retain(|f| !f.starts_with(path));
        Ok(())
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>, FsError> {
        let inner = self.lock();
        if !inner.dirs.contains(dir) {
            return Err(FsError::io("list directory", dir, not_found()));
        }
        Ok(inner
            .files
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .cloned()
            .collect())
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        let inner = self.lock();
        if inner.unreadable.contains(path) {
            return Err(FsError::io(
                "read",
                path,
                io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
            ));
        }
        inner
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| FsError::io("read", path, not_found()))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        let contents = self.read_file(from)?;
        let mut inner = self.lock();
        inner.check_writable(to, "copy")?;
        inner.files.insert(to.to_path_buf(), contents);
        Ok(())
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), FsError> {
        let mut inner = self.lock();
        inner.check_writable(path, "write")?;
        inner.files.insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }
}
