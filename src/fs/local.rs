//! fs::local
//!
//! File-system capability backed by `std::fs`.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use super::traits::{FileSystem, FsError};

/// The real file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        // symlink_metadata so a dangling link still counts as present
        fs::symlink_metadata(path).is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_readable_file(&self, path: &Path) -> bool {
        path.is_file() && File::open(path).is_ok()
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), FsError> {
        fs::create_dir_all(path).map_err(|e| FsError::io("create directory", path, e))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<(), FsError> {
        let meta = fs::symlink_metadata(path).map_err(|e| FsError::io("inspect", path, e))?;
        if meta.is_dir() {
            fs::remove_dir_all(path).map_err(|e| FsError::io("remove directory", path, e))
        } else {
            fs::remove_file(path).map_err(|e| FsError::io("remove", path, e))
        }
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>, FsError> {
        let entries = fs::read_dir(dir).map_err(|e| FsError::io("list directory", dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| FsError::io("list directory", dir, e))?;
            let path = entry.path();
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        fs::read(path).map_err(|e| FsError::io("read", path, e))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| FsError::io("copy", from, e))
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), FsError> {
        fs::write(path, contents).map_err(|e| FsError::io("write", path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn recreate_dir_empties_existing() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("scratch");
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("stale.graphql"), "type Stale { id: ID }").unwrap();

        LocalFileSystem.recreate_dir(&dir).expect("recreate");

        assert!(dir.is_dir());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn recreate_dir_creates_missing_parents() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a/b/c");
        LocalFileSystem.recreate_dir(&dir).expect("recreate");
        assert!(dir.is_dir());
    }

    #[test]
    fn recreate_dir_replaces_plain_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("scratch");
        fs::write(&path, "not a dir").unwrap();

        LocalFileSystem.recreate_dir(&path).expect("recreate");
        assert!(path.is_dir());
    }

    #[test]
    fn list_files_is_flat_and_sorted() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b.js"), "").unwrap();
        fs::write(tmp.path().join("a.graphql"), "").unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();
        fs::write(tmp.path().join("nested/c.js"), "").unwrap();

        let files = LocalFileSystem.list_files(tmp.path()).expect("list");
        assert_eq!(
            files,
            vec![tmp.path().join("a.graphql"), tmp.path().join("b.js")]
        );
    }

    #[test]
    fn copy_is_byte_identical() {
        let tmp = TempDir::new().unwrap();
        let from = tmp.path().join("a.graphql");
        let to = tmp.path().join("copy.graphql");
        let bytes = b"type Query {\r\n  a: String\r\n}\n\xef\xbb\xbf";
        fs::write(&from, bytes).unwrap();

        LocalFileSystem.copy_file(&from, &to).expect("copy");
        assert_eq!(fs::read(&to).unwrap(), bytes.to_vec());
    }

    #[test]
    fn readable_file_checks() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("private.env");
        fs::write(&file, "KEY=value").unwrap();

        assert!(LocalFileSystem.is_readable_file(&file));
        assert!(!LocalFileSystem.is_readable_file(tmp.path()));
        assert!(!LocalFileSystem.is_readable_file(&tmp.path().join("missing")));
    }

    #[test]
    fn list_missing_dir_errors() {
        let tmp = TempDir::new().unwrap();
        let err = LocalFileSystem
            .list_files(&tmp.path().join("missing"))
            .unwrap_err();
        assert!(err.to_string().contains("list directory"));
    }
}
