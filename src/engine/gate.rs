//! engine::gate
//!
//! Mode gating: decide whether startup may proceed.
//!
//! # Rules
//!
//! | mode | config path           | result                          |
//! |------|-----------------------|---------------------------------|
//! | live | none                  | fatal                           |
//! | live | missing or unreadable | warning, then fatal             |
//! | live | valid                 | pass with config                |
//! | mock | none                  | pass                            |
//! | mock | missing or unreadable | warning, pass without config    |
//! | mock | valid                 | pass with config                |
//!
//! **Key principle:** No silent downgrades. A live run never starts
//! without its private config.
//!
//! # Example
//!
//! ```
//! use gql_bootstrap::core::types::RunMode;
//! use gql_bootstrap::engine::gate::{gate, GateError};
//! use gql_bootstrap::fs::MemoryFileSystem;
//!
//! let fs = MemoryFileSystem::new();
//! let err = gate(RunMode::Live, None, &fs).unwrap_err();
//! assert_eq!(err, GateError::LiveWithoutConfig);
//!
//! let pass = gate(RunMode::Mock, None, &fs).unwrap();
//! assert!(pass.config.is_none());
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::{ConfigReference, RunMode};
use crate::fs::FileSystem;

/// Errors from gating. All of them are fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    /// Live mode and no `--config` at all.
    #[error("live mode requires a private config file, but none was given")]
    LiveWithoutConfig,

    /// Live mode with a config path that cannot be used.
    #[error(
        "live mode requires a private config file, but '{}' {}",
        .path.display(),
        .reason
    )]
    LiveConfigUnusable { path: PathBuf, reason: &'static str },
}

impl GateError {
    /// Warning to show before the error, if the config path was unusable.
    pub fn warning(&self) -> Option<String> {
        match self {
            GateError::LiveWithoutConfig => None,
            GateError::LiveConfigUnusable { path, reason } => {
                Some(unusable_config(path, reason))
            }
        }
    }

    /// Example invocations shown after the error.
    pub fn usage_hint(&self) -> &'static str {
        "\
Live deployments must not run without credentials. Pass the private
environment file with --config, or run offline with --mock:

    gql-bootstrap --live --config ./private.env
    gql-bootstrap --mock --data-source-dir ./fixtures/mock"
    }
}

/// Result of a passed gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatePass {
    /// The mode the run proceeds in.
    pub mode: RunMode,
    /// The validated private config, if one was supplied and usable.
    pub config: Option<ConfigReference>,
    /// Non-fatal problems found while gating.
    pub warnings: Vec<String>,
}

/// Gate a run.
///
/// `config` must already be absolute (see [`crate::core::paths::resolve`]).
///
/// # Errors
///
/// Returns a `GateError` when `mode` is live and no usable config file
/// was supplied.
pub fn gate(
    mode: RunMode,
    config: Option<&Path>,
    fs: &dyn FileSystem,
) -> Result<GatePass, GateError> {
    let mut warnings = Vec::new();

    let config = match config {
        None => None,
        Some(path) if fs.is_readable_file(path) => Some(ConfigReference::new(path.to_path_buf())),
        Some(path) => {
            let reason = if fs.exists(path) {
                "is not a readable file"
            } else {
                "does not exist"
            };
            if mode.is_live() {
                tracing::debug!(path = %path.display(), "live gate rejected config");
                return Err(GateError::LiveConfigUnusable {
                    path: path.to_path_buf(),
                    reason,
                });
            }
            warnings.push(unusable_config(path, reason));
            None
        }
    };

    if mode.is_live() && config.is_none() {
        return Err(GateError::LiveWithoutConfig);
    }

    tracing::debug!(%mode, has_config = config.is_some(), "gate passed");

    Ok(GatePass {
        mode,
        config,
        warnings,
    })
}

fn unusable_config(path: &Path, reason: &str) -> String {
    format!("config file '{}' {}", path.display(), reason)
}
