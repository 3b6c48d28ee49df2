//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! The bootstrapper has two configuration scopes:
//! - **Global**: User-level settings shared by every service
//! - **Service**: `gql-bootstrap.toml` in the service root
//!
//! This is the bootstrapper's own configuration. It is unrelated to the
//! private environment file passed with `--config`, whose contents are
//! never read.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Service config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$GQL_BOOTSTRAP_CONFIG` if set
//! 2. `<config_dir>/gql-bootstrap/config.toml` (`$XDG_CONFIG_HOME` on Linux)
//!
//! # Example
//!
//! ```no_run
//! use gql_bootstrap::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Path::new("/srv/orders")).unwrap();
//! let config = result.config;
//!
//! println!("Server: {:?}", config.server_command());
//! println!("Scratch: {}", config.scratch_dir(Path::new("/srv/orders")).display());
//! ```

pub mod schema;

pub use schema::{CompilerConfig, DataSourceConfig, ServerConfig, ServiceConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::compile::CompilerSettings;
use crate::core::paths;
use crate::core::types::DataSourceLayout;

/// Environment variable naming an explicit global config file.
pub const CONFIG_ENV: &str = "GQL_BOOTSTRAP_CONFIG";

/// Default server command, run from the service root.
pub const DEFAULT_SERVER_COMMAND: &[&str] = &["node", "dist/server.js"];

/// Default module compiler command.
pub const DEFAULT_COMPILER_COMMAND: &[&str] = &["npx", "babel", "{input}"];

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence: service config overrides global config,
/// which overrides the built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: ServiceConfig,
    /// Service configuration (if the service root has one)
    pub service: Option<ServiceConfig>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the service config file (if loaded)
    service_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration for a service root from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be read or parsed,
    /// or if they contain invalid values. Missing files are not an error.
    pub fn load(service_root: &Path) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();
        let global_path = Self::locate_global(&mut warnings);
        let mut result = Self::load_from(global_path.as_deref(), service_root)?;
        warnings.append(&mut result.warnings);
        result.warnings = warnings;
        Ok(result)
    }

    /// Load configuration from an explicit global file and a service root.
    pub fn load_from(
        global_path: Option<&Path>,
        service_root: &Path,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let warnings = Vec::new();

        let (global, global_path) = match global_path {
            Some(path) if path.is_file() => (Self::read_config(path)?, Some(path.to_path_buf())),
            _ => (ServiceConfig::default(), None),
        };

        let candidate = paths::service_config_path(service_root);
        let (service, service_path) = if candidate.is_file() {
            (Some(Self::read_config(&candidate)?), Some(candidate))
        } else {
            (None, None)
        };

        global.validate()?;
        if let Some(ref s) = service {
            s.validate()?;
        }

        tracing::debug!(
            global = ?global_path,
            service = ?service_path,
            "loaded bootstrap configuration"
        );

        let config = Config {
            global,
            service,
            global_path,
            service_path,
        };
        // Scopes are valid alone but may still clash once merged.
        check_layout(&config.layout())?;

        Ok(ConfigLoadResult { config, warnings })
    }

    /// Find the global config file.
    fn locate_global(warnings: &mut Vec<ConfigWarning>) -> Option<PathBuf> {
        // 1. Check $GQL_BOOTSTRAP_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.is_file() {
                return Some(path);
            }
            warnings.push(ConfigWarning {
                message: format!("{} points at a missing file, ignoring it", CONFIG_ENV),
                path,
            });
        }

        // 2. Check <config_dir>/gql-bootstrap/config.toml
        dirs::config_dir()
            .map(|dir| dir.join("gql-bootstrap").join("config.toml"))
            .filter(|path| path.is_file())
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Path of the global config file, if one was loaded.
    pub fn global_path(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Path of the service config file, if one was loaded.
    pub fn service_path(&self) -> Option<&Path> {
        self.service_path.as_deref()
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Pick the first value the service or global scope sets.
    fn pick<T>(&self, get: impl Fn(&ServiceConfig) -> Option<T>) -> Option<T> {
        self.service.as_ref().and_then(&get).or_else(|| get(&self.global))
    }

    /// Get the scratch directory for staged data sources.
    ///
    /// Relative values are resolved against the service root.
    /// Defaults to [`paths::default_scratch_dir`].
    pub fn scratch_dir(&self, service_root: &Path) -> PathBuf {
        self.pick(|c| c.scratch_dir.clone())
            .map(|dir| paths::resolve(service_root, &dir))
            .unwrap_or_else(paths::default_scratch_dir)
    }

    /// Get the server command.
    ///
    /// Defaults to `node dist/server.js`.
    pub fn server_command(&self) -> Vec<String> {
        self.pick(|c| c.server.as_ref().and_then(|s| s.command.clone()))
            .unwrap_or_else(|| to_owned(DEFAULT_SERVER_COMMAND))
    }

    /// Get the module compiler settings.
    ///
    /// Defaults to `npx babel {input}`, not passthrough.
    pub fn compiler(&self) -> CompilerSettings {
        let command = self
            .pick(|c| c.compiler.as_ref().and_then(|x| x.command.clone()))
            .unwrap_or_else(|| to_owned(DEFAULT_COMPILER_COMMAND));
        let passthrough = self
            .pick(|c| c.compiler.as_ref().and_then(|x| x.passthrough))
            .unwrap_or(false);
        CompilerSettings {
            command,
            passthrough,
        }
    }

    /// Get the data source layout.
    pub fn layout(&self) -> DataSourceLayout {
        let defaults = DataSourceLayout::default();
        let source_subdir = self
            .pick(|c| c.data_source.as_ref().and_then(|d| d.source_subdir.clone()))
            .map(PathBuf::from)
            .unwrap_or(defaults.source_subdir);
        let schema_extensions = self
            .pick(|c| {
                c.data_source
                    .as_ref()
                    .and_then(|d| d.schema_extensions.clone())
            })
            .unwrap_or(defaults.schema_extensions);
        let module_extensions = self
            .pick(|c| {
                c.data_source
                    .as_ref()
                    .and_then(|d| d.module_extensions.clone())
            })
            .unwrap_or(defaults.module_extensions);

        DataSourceLayout {
            source_subdir,
            schema_extensions,
            module_extensions,
        }
    }
}

/// Reject a merged layout where one extension is both schema and module.
fn check_layout(layout: &DataSourceLayout) -> Result<(), ConfigError> {
    match layout
        .schema_extensions
        .iter()
        .find(|ext| layout.module_extensions.contains(ext))
    {
        Some(shared) => Err(ConfigError::InvalidValue(format!(
            "extension '{}' is listed as both schema and module after merging config scopes",
            shared
        ))),
        None => Ok(()),
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).expect("write config");
        path
    }

    #[test]
    fn defaults_without_files() {
        let root = TempDir::new().unwrap();
        let result = Config::load_from(None, root.path()).expect("load");
        let config = result.config;

        assert!(config.service.is_none());
        assert!(config.global_path().is_none());
        assert_eq!(config.server_command(), vec!["node", "dist/server.js"]);
        assert_eq!(config.compiler().command, vec!["npx", "babel", "{input}"]);
        assert!(!config.compiler().passthrough);
        assert_eq!(config.layout(), DataSourceLayout::default());
        assert_eq!(
            config.scratch_dir(root.path()),
            paths::default_scratch_dir()
        );
    }

    #[test]
    fn service_file_is_loaded() {
        let root = TempDir::new().unwrap();
        write(
            root.path(),
            "gql-bootstrap.toml",
            "[server]\ncommand = [\"./bin/serve\"]\n",
        );

        let config = Config::load_from(None, root.path()).expect("load").config;
        assert_eq!(config.server_command(), vec!["./bin/serve"]);
        assert_eq!(
            config.service_path(),
            Some(root.path().join("gql-bootstrap.toml").as_path())
        );
    }

    #[test]
    fn service_overrides_global() {
        let root = TempDir::new().unwrap();
        let global_dir = TempDir::new().unwrap();
        let global = write(
            global_dir.path(),
            "config.toml",
            "scratch_dir = \"/tmp/global-ds\"\n[compiler]\npassthrough = true\n",
        );
        write(
            root.path(),
            "gql-bootstrap.toml",
            "scratch_dir = \"staging\"\n",
        );

        let config = Config::load_from(Some(&global), root.path())
            .expect("load")
            .config;

        // service wins for scratch_dir, relative to the service root
        assert_eq!(config.scratch_dir(root.path()), root.path().join("staging"));
        // global still supplies what the service file leaves unset
        assert!(config.compiler().passthrough);
    }

    #[test]
    fn missing_global_path_is_ignored() {
        let root = TempDir::new().unwrap();
        let missing = root.path().join("nope.toml");
        let result = Config::load_from(Some(&missing), root.path()).expect("load");
        assert!(result.config.global_path().is_none());
    }

    #[test]
    fn layout_merges_fields_independently() {
        let root = TempDir::new().unwrap();
        write(
            root.path(),
            "gql-bootstrap.toml",
            "[data_source]\nschema_extensions = [\"graphql\", \"gql\"]\n",
        );

        let layout = Config::load_from(None, root.path())
            .expect("load")
            .config
            .layout();
        assert_eq!(layout.schema_extensions, vec!["graphql", "gql"]);
        assert_eq!(layout.module_extensions, vec!["js"]);
        assert_eq!(layout.source_subdir, PathBuf::from("src"));
    }

    #[test]
    fn schema_extension_clashing_with_default_modules_is_rejected() {
        let root = TempDir::new().unwrap();
        write(
            root.path(),
            "gql-bootstrap.toml",
            "[data_source]\nschema_extensions = [\"graphql\", \"js\"]\n",
        );

        let err = Config::load_from(None, root.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
        assert!(err.to_string().contains("'js'"));
    }

    #[test]
    fn extensions_clashing_across_scopes_are_rejected() {
        let root = TempDir::new().unwrap();
        let global_dir = TempDir::new().unwrap();
        let global = write(
            global_dir.path(),
            "config.toml",
            "[data_source]\nmodule_extensions = [\"mjs\"]\n",
        );
        write(
            root.path(),
            "gql-bootstrap.toml",
            "[data_source]\nschema_extensions = [\"mjs\"]\n",
        );

        let err = Config::load_from(Some(&global), root.path()).unwrap_err();
        assert!(err.to_string().contains("both schema and module"));
    }

    #[test]
    fn parse_error_names_file() {
        let root = TempDir::new().unwrap();
        write(root.path(), "gql-bootstrap.toml", "server = [");

        let err = Config::load_from(None, root.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("gql-bootstrap.toml"));
    }

    #[test]
    fn invalid_value_is_rejected() {
        let root = TempDir::new().unwrap();
        write(
            root.path(),
            "gql-bootstrap.toml",
            "[server]\ncommand = []\n",
        );

        let err = Config::load_from(None, root.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }
}
