//! core::paths
//!
//! Path resolution for the bootstrapper.
//!
//! # Architecture
//!
//! Every path the user hands us (config file, data source directory,
//! scratch directory, service root) is resolved here exactly once, against
//! the directory the CLI was invoked from. Nothing downstream calls
//! `std::env::current_dir` or changes the process working directory.
//!
//! Resolution is lexical: `.` and `..` components are folded without
//! touching the file system, so the result is stable even for paths that
//! do not exist yet (the scratch directory, typically).
//!
//! # Example
//!
//! ```
//! use gql_bootstrap::core::paths::resolve;
//! use std::path::{Path, PathBuf};
//!
//! let base = Path::new("/work/service");
//! assert_eq!(
//!     resolve(base, Path::new("./fixtures/../mock")),
//!     PathBuf::from("/work/service/mock")
//! );
//! assert_eq!(resolve(base, Path::new("/abs")), PathBuf::from("/abs"));
//! ```

use std::path::{Component, Path, PathBuf};

/// Name of the per-service config file, looked up in the service root.
pub const SERVICE_CONFIG_FILE: &str = "gql-bootstrap.toml";

/// Make `path` absolute against `base` and normalize it lexically.
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Fold `.` and `..` components without consulting the file system.
///
/// `..` at the root stays at the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}

/// Default scratch directory: `<temp>/gql-bootstrap/data-sources`.
pub fn default_scratch_dir() -> PathBuf {
    std::env::temp_dir()
        .join("gql-bootstrap")
        .join("data-sources")
}

/// The per-service config file for a service root.
pub fn service_config_path(service_root: &Path) -> PathBuf {
    service_root.join(SERVICE_CONFIG_FILE)
}

/// True if either path equals or contains the other.
///
/// Both paths must already be normalized.
pub fn overlaps(a: &Path, b: &Path) -> bool {
    a.starts_with(b) || b.starts_with(a)
}
