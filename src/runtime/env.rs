//! runtime::env
//!
//! Reading the bootstrap variables back from an environment.

use std::path::PathBuf;

use serde::Serialize;

use crate::core::types::{RunMode, APP_ENV_PRIVATE, GQL_DATA_SOURCES, NODE_ENV};

/// The bootstrap variables as the server sees them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuntimeEnv {
    /// Mode from `NODE_ENV`; `None` if unset or unrecognized.
    pub mode: Option<RunMode>,
    /// Staged data source directory from `GQL_DATA_SOURCES`.
    pub data_sources: Option<PathBuf>,
    /// Private config file from `APP_ENV_PRIVATE`.
    pub private_config: Option<PathBuf>,
}

impl RuntimeEnv {
    /// Read from key/value pairs. Empty values count as unset.
    ///
    /// # Example
    ///
    /// ```
    /// use gql_bootstrap::core::types::RunMode;
    /// use gql_bootstrap::runtime::RuntimeEnv;
    ///
    /// let env = RuntimeEnv::from_vars([
    ///     ("NODE_ENV", "development"),
    ///     ("GQL_DATA_SOURCES", "/tmp/scratch"),
    ///     ("APP_ENV_PRIVATE", ""),
    /// ]);
    /// assert_eq!(env.mode, Some(RunMode::Mock));
    /// assert!(env.private_config.is_none());
    /// ```
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut env = Self::default();
        for (key, value) in vars {
            let value = value.as_ref();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                NODE_ENV => env.mode = RunMode::from_node_env(value),
                GQL_DATA_SOURCES => env.data_sources = Some(PathBuf::from(value)),
                APP_ENV_PRIVATE => env.private_config = Some(PathBuf::from(value)),
                _ => {}
            }
        }
        env
    }

    /// Read from the current process environment.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars_os().filter_map(|(k, v)| {
            Some((k.into_string().ok()?, v.into_string().ok()?))
        }))
    }

    /// Whether the server runs against production data.
    pub fn is_live(&self) -> bool {
        self.mode.is_some_and(|m| m.is_live())
    }
}
