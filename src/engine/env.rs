//! engine::env
//!
//! Environment composition for the server process.
//!
//! Resolved paths become `KEY=value` assignments. A value that is absent
//! is omitted, never set empty:
//!
//! - `NODE_ENV` - always, from the run mode
//! - `GQL_DATA_SOURCES` - only when a data source was staged
//! - `APP_ENV_PRIVATE` - only when a valid config file was supplied
//!
//! # Example
//!
//! ```
//! use gql_bootstrap::core::types::RunMode;
//! use gql_bootstrap::engine::env::{compose, unset_keys};
//!
//! let env = compose(RunMode::Mock, None, None);
//! assert_eq!(env.len(), 1);
//! assert_eq!(env[0].to_string(), "NODE_ENV=development");
//! assert_eq!(unset_keys(&env), vec!["GQL_DATA_SOURCES", "APP_ENV_PRIVATE"]);
//! ```

use crate::core::types::{
    ConfigReference, DataSourcePaths, EnvAssignment, RunMode, APP_ENV_PRIVATE, GQL_DATA_SOURCES,
    MANAGED_ENV_KEYS, NODE_ENV,
};

/// Compose the assignments for a run.
///
/// Pure; the order is `NODE_ENV`, `GQL_DATA_SOURCES`, `APP_ENV_PRIVATE`.
pub fn compose(
    mode: RunMode,
    staged: Option<&DataSourcePaths>,
    config: Option<&ConfigReference>,
) -> Vec<EnvAssignment> {
    let mut env = vec![EnvAssignment::new(NODE_ENV, mode.node_env())];

    if let Some(paths) = staged {
        env.push(EnvAssignment::path(GQL_DATA_SOURCES, &paths.scratch_dir));
    }
    if let Some(config) = config {
        env.push(EnvAssignment::path(APP_ENV_PRIVATE, config.path()));
    }

    env
}

/// Managed keys with no assignment.
///
/// These are removed from the inherited environment of the child.
pub fn unset_keys(env: &[EnvAssignment]) -> Vec<String> {
    MANAGED_ENV_KEYS
        .iter()
        .filter(|key| !env.iter().any(|a| a.key == **key))
        .map(|key| key.to_string())
        .collect()
}
