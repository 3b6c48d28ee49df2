//! process::mock
//!
//! Recording spawner for deterministic testing.
//!
//! Nothing is started. Each spec is recorded and a configured exit code is
//! returned.
//!
//! # Example
//!
//! ```
//! use gql_bootstrap::process::{LaunchSpec, ProcessSpawner, RecordingSpawner};
//! use std::path::PathBuf;
//!
//! let spawner = RecordingSpawner::with_exit_code(3);
//! let spec = LaunchSpec {
//!     cwd: PathBuf::from("/srv/app"),
//!     program: "node".into(),
//!     args: vec![],
//!     env: vec![],
//!     env_remove: vec![],
//! };
//!
//! assert_eq!(spawner.run(&spec).unwrap(), 3);
//! assert_eq!(spawner.launches(), vec![spec]);
//! ```

use std::sync::{Arc, Mutex};

use super::spec::LaunchSpec;
use super::traits::{ProcessSpawner, SpawnError};

/// Spawner that records launches instead of performing them.
///
/// Clones share recorded launches.
#[derive(Debug, Clone, Default)]
pub struct RecordingSpawner {
    inner: Arc<Mutex<RecordingInner>>,
}

#[derive(Debug, Default)]
struct RecordingInner {
    launches: Vec<LaunchSpec>,
    exit_code: i32,
}

impl RecordingSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawner whose "server" exits with `code`.
    pub fn with_exit_code(code: i32) -> Self {
        let spawner = Self::default();
        spawner.lock().exit_code = code;
        spawner
    }

    /// Specs passed to `run`, in order.
    pub fn launches(&self) -> Vec<LaunchSpec> {
        self.lock().launches.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RecordingInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ProcessSpawner for RecordingSpawner {
    fn run(&self, spec: &LaunchSpec) -> Result<i32, SpawnError> {
        let mut inner = self.lock();
        inner.launches.push(spec.clone());
        Ok(inner.exit_code)
    }
}
