//! core::types
//!
//! Strong types for the values that flow through one bootstrap run.
//!
//! # Types
//!
//! - [`RunMode`] - Live or mock
//! - [`DataSourcePaths`] - Absolute source and scratch directories
//! - [`DataSourceLayout`] - Which files of a data source are schemas and modules
//! - [`ConfigReference`] - A private config file that passed validation
//! - [`EnvAssignment`] - One `KEY=value` pair for the server process
//!
//! All of these are process-lifetime values. Nothing here is persisted.
//!
//! # Examples
//!
//! ```
//! use gql_bootstrap::core::types::{EnvAssignment, RunMode};
//!
//! assert_eq!(RunMode::Live.node_env(), "production");
//! assert_eq!(RunMode::default(), RunMode::Mock);
//!
//! let assignment = EnvAssignment::new("NODE_ENV", "development");
//! assert_eq!(assignment.to_string(), "NODE_ENV=development");
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Points the server at the staged mock data source directory.
pub const GQL_DATA_SOURCES: &str = "GQL_DATA_SOURCES";

/// Points the server at the private environment file.
pub const APP_ENV_PRIVATE: &str = "APP_ENV_PRIVATE";

/// Carries the run mode to the server.
pub const NODE_ENV: &str = "NODE_ENV";

/// Every variable the bootstrapper owns in the child environment.
pub const MANAGED_ENV_KEYS: &[&str] = &[NODE_ENV, GQL_DATA_SOURCES, APP_ENV_PRIVATE];

/// How the service is started.
///
/// Selected once from the mutually exclusive `--live` / `--mock` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Production run against real upstream data sources.
    ///
    /// Requires a private config file.
    Live,

    /// Offline development run, optionally with a staged data source.
    #[default]
    Mock,
}

impl RunMode {
    /// Resolve the mode from the two CLI flags.
    ///
    /// The parser already rejects both flags together; neither means mock.
    pub fn from_flags(live: bool, mock: bool) -> Self {
        match (live, mock) {
            (true, _) => RunMode::Live,
            (false, _) => RunMode::Mock,
        }
    }

    /// Value exported as `NODE_ENV` for this mode.
    pub fn node_env(&self) -> &'static str {
        match self {
            RunMode::Live => "production",
            RunMode::Mock => "development",
        }
    }

    /// Inverse of [`RunMode::node_env`].
    pub fn from_node_env(value: &str) -> Option<Self> {
        match value {
            "production" => Some(RunMode::Live),
            "development" => Some(RunMode::Mock),
            _ => None,
        }
    }

    /// Whether this is a live run.
    pub fn is_live(&self) -> bool {
        matches!(self, RunMode::Live)
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Live => write!(f, "live"),
            RunMode::Mock => write!(f, "mock"),
        }
    }
}

/// Source and scratch directories of one staging run.
///
/// Both paths are absolute. The scratch directory is wiped and recreated
/// every time the data source is staged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataSourcePaths {
    /// The external data source directory (contains `src/`).
    pub source_dir: PathBuf,
    /// Disposable directory the server reads from.
    pub scratch_dir: PathBuf,
}

impl DataSourcePaths {
    pub fn new(source_dir: PathBuf, scratch_dir: PathBuf) -> Self {
        Self {
            source_dir,
            scratch_dir,
        }
    }
}

/// Where a data source keeps its files and which files are which.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataSourceLayout {
    /// Subfolder of the data source holding schema files and modules.
    pub source_subdir: PathBuf,
    /// Extensions copied byte-for-byte.
    pub schema_extensions: Vec<String>,
    /// Extensions run through the module compiler.
    pub module_extensions: Vec<String>,
}

impl Default for DataSourceLayout {
    fn default() -> Self {
        Self {
            source_subdir: PathBuf::from("src"),
            schema_extensions: vec!["graphql".to_string()],
            module_extensions: vec!["js".to_string()],
        }
    }
}

impl DataSourceLayout {
    /// The `src/` folder of a data source directory.
    pub fn source_files_dir(&self, source_dir: &Path) -> PathBuf {
        source_dir.join(&self.source_subdir)
    }

    /// Whether the file is a schema file.
    pub fn is_schema(&self, path: &Path) -> bool {
        has_extension(path, &self.schema_extensions)
    }

    /// Whether the file is a source module.
    pub fn is_module(&self, path: &Path) -> bool {
        has_extension(path, &self.module_extensions)
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e == ext))
}

/// A private config file that exists and is readable.
///
/// Only [`crate::engine::gate`] constructs these; the contents are never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConfigReference(PathBuf);

impl ConfigReference {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ConfigReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// One environment variable for the server process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvAssignment {
    pub key: String,
    pub value: String,
}

impl EnvAssignment {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Assignment whose value is a path.
    ///
    /// Non-UTF-8 paths are converted lossily.
    pub fn path(key: impl Into<String>, value: &Path) -> Self {
        Self::new(key, value.to_string_lossy().into_owned())
    }
}

impl fmt::Display for EnvAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod run_mode {
        use super::*;

        #[test]
        fn flags_select_mode() {
            assert_eq!(RunMode::from_flags(true, false), RunMode::Live);
            assert_eq!(RunMode::from_flags(false, true), RunMode::Mock);
            assert_eq!(RunMode::from_flags(false, false), RunMode::Mock);
        }

        #[test]
        fn node_env_values() {
            assert_eq!(RunMode::Live.node_env(), "production");
            assert_eq!(RunMode::Mock.node_env(), "development");
        }

        #[test]
        fn node_env_parses_back() {
            for mode in [RunMode::Live, RunMode::Mock] {
                assert_eq!(RunMode::from_node_env(mode.node_env()), Some(mode));
            }
            assert_eq!(RunMode::from_node_env("test"), None);
        }

        #[test]
        fn display() {
            assert_eq!(RunMode::Live.to_string(), "live");
            assert_eq!(RunMode::Mock.to_string(), "mock");
        }

        #[test]
        fn serializes_lowercase() {
            let json = serde_json::to_string(&RunMode::Live).unwrap();
            assert_eq!(json, "\"live\"");
        }
    }

    mod env_assignment {
        use super::*;

        #[test]
        fn displays_as_key_value() {
            let a = EnvAssignment::new(GQL_DATA_SOURCES, "/tmp/ds");
            assert_eq!(a.to_string(), "GQL_DATA_SOURCES=/tmp/ds");
        }

        #[test]
        fn path_constructor() {
            let a = EnvAssignment::path(APP_ENV_PRIVATE, Path::new("/etc/app.env"));
            assert_eq!(a.key, "APP_ENV_PRIVATE");
            assert_eq!(a.value, "/etc/app.env");
        }
    }

    mod layout {
        use super::*;

        #[test]
        fn default_layout() {
            let layout = DataSourceLayout::default();
            assert_eq!(
                layout.source_files_dir(Path::new("/ds")),
                PathBuf::from("/ds/src")
            );
            assert!(layout.is_schema(Path::new("a.graphql")));
            assert!(layout.is_module(Path::new("b.js")));
        }

        #[test]
        fn other_files_are_neither() {
            let layout = DataSourceLayout::default();
            for name in ["README.md", "a.graphql.bak", "noext", ".graphql"] {
                let path = Path::new(name);
                assert!(!layout.is_schema(path), "{} is not a schema", name);
                assert!(!layout.is_module(path), "{} is not a module", name);
            }
        }
    }

    #[test]
    fn managed_keys_are_distinct() {
        let mut keys = MANAGED_ENV_KEYS.to_vec();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), MANAGED_ENV_KEYS.len());
    }

    #[test]
    fn config_reference_display() {
        let r = ConfigReference::new(PathBuf::from("/srv/private.env"));
        assert_eq!(r.to_string(), "/srv/private.env");
        assert_eq!(r.path(), Path::new("/srv/private.env"));
    }
}
