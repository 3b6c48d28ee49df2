//! fs::traits
//!
//! File-system capability trait.
//!
//! # Design
//!
//! The stager and the mode gate only touch the disk through this trait.
//! It covers exactly the operations they need, nothing general-purpose.
//! Listing is flat and sorted so staging order is deterministic.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from file-system operations.
///
/// `op` names the failed operation ("copy", "remove directory", ...).
#[derive(Debug, Error)]
pub enum FsError {
    #[error("failed to {op} '{}': {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        source: io::Error,
    },
}

impl FsError {
    pub fn io(op: &'static str, path: &Path, source: io::Error) -> Self {
        FsError::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    /// The path the failed operation was about.
    pub fn path(&self) -> &Path {
        match self {
            FsError::Io { path, .. } => path,
        }
    }
}

/// Trait for file-system access.
pub trait FileSystem {
    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Whether `path` is a regular file this process can open for reading.
    fn is_readable_file(&self, path: &Path) -> bool;

    /// Create a directory and any missing parents.
    fn create_dir_all(&self, path: &Path) -> Result<(), FsError>;

    /// Remove a directory and everything under it.
    fn remove_dir_all(&self, path: &Path) -> Result<(), FsError>;

    /// Regular files directly inside `dir`, sorted by path.
    ///
    /// Subdirectories are not descended into.
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>, FsError>;

    /// Read a whole file.
    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FsError>;

    /// Copy a file byte-for-byte, replacing `to` if present.
    fn copy_file(&self, from: &Path, to: &Path) -> Result<(), FsError>;

    /// Write a whole file, replacing it if present.
    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), FsError>;

    /// Make `path` an empty directory.
    ///
    /// Anything already there is deleted first; nothing is merged.
    fn recreate_dir(&self, path: &Path) -> Result<(), FsError> {
        if self.exists(path) {
            self.remove_dir_all(path)?;
        }
        self.create_dir_all(path)
    }
}
