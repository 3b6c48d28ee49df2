//! core::config::schema
//!
//! Configuration schema types.
//!
//! The same schema is used for both scopes (global and per-service). Every
//! field is optional so a file only needs to name what it overrides.
//!
//! # Validation
//!
//! Values are validated after parsing: commands must not be empty,
//! extensions are written without a leading dot, and the source subfolder
//! must stay inside the data source directory.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Bootstrapper configuration.
///
/// # Example
///
/// ```toml
/// scratch_dir = "/tmp/orders-data-sources"
///
/// [server]
/// command = ["node", "dist/server.js"]
///
/// [compiler]
/// command = ["npx", "babel", "{input}"]
///
/// [data_source]
/// source_subdir = "src"
/// schema_extensions = ["graphql"]
/// module_extensions = ["js"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Where staged data sources go. Relative paths are taken from the service root.
    pub scratch_dir: Option<PathBuf>,

    /// How to start the server
    pub server: Option<ServerConfig>,

    /// How to compile source modules
    pub compiler: Option<CompilerConfig>,

    /// Layout of a data source directory
    pub data_source: Option<DataSourceConfig>,
}

impl ServiceConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(server) = &self.server {
            server.validate()?;
        }
        if let Some(compiler) = &self.compiler {
            compiler.validate()?;
        }
        if let Some(data_source) = &self.data_source {
            data_source.validate()?;
        }
        Ok(())
    }
}

/// Server process settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Program and arguments, run from the service root
    pub command: Option<Vec<String>>,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_command("server.command", self.command.as_deref())
    }
}

/// Module compiler settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Program and arguments; `{input}` is replaced by the source file path
    pub command: Option<Vec<String>>,

    /// Copy modules unchanged instead of compiling them
    pub passthrough: Option<bool>,
}

impl CompilerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_command("compiler.command", self.command.as_deref())
    }
}

/// Data source directory layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DataSourceConfig {
    /// Subfolder holding schema files and modules (default: "src")
    pub source_subdir: Option<String>,

    /// Extensions copied verbatim (default: ["graphql"])
    pub schema_extensions: Option<Vec<String>>,

    /// Extensions compiled before staging (default: ["js"])
    pub module_extensions: Option<Vec<String>>,
}

impl DataSourceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(subdir) = &self.source_subdir {
            let path = Path::new(subdir);
            let escapes = path
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
            if subdir.is_empty() || escapes {
                return Err(ConfigError::InvalidValue(format!(
                    "data_source.source_subdir '{}' must be a relative path inside the data source",
                    subdir
                )));
            }
        }

        validate_extensions(
            "data_source.schema_extensions",
            self.schema_extensions.as_deref(),
        )?;
        validate_extensions(
            "data_source.module_extensions",
            self.module_extensions.as_deref(),
        )?;

        if let (Some(schemas), Some(modules)) = (&self.schema_extensions, &self.module_extensions)
        {
            if let Some(shared) = schemas.iter().find(|ext| modules.contains(ext)) {
                return Err(ConfigError::InvalidValue(format!(
                    "extension '{}' is listed as both schema and module",
                    shared
                )));
            }
        }

        Ok(())
    }
}

fn validate_command(key: &str, command: Option<&[String]>) -> Result<(), ConfigError> {
    match command {
        Some([]) => Err(ConfigError::InvalidValue(format!(
            "{} must name a program",
            key
        ))),
        Some([program, ..]) if program.trim().is_empty() => Err(ConfigError::InvalidValue(
            format!("{} has an empty program name", key),
        )),
        _ => Ok(()),
    }
}

fn validate_extensions(key: &str, extensions: Option<&[String]>) -> Result<(), ConfigError> {
    let Some(extensions) = extensions else {
        return Ok(());
    };

    if extensions.is_empty() {
        return Err(ConfigError::InvalidValue(format!(
            "{} must list at least one extension",
            key
        )));
    }

    for ext in extensions {
        if ext.is_empty() || ext.starts_with('.') || ext.contains('/') {
            return Err(ConfigError::InvalidValue(format!(
                "{} entry '{}' must be a bare extension like \"graphql\"",
                key, ext
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_valid() {
        assert!(ServiceConfig::default().validate().is_ok());
    }

    #[test]
    fn parses_full_example() {
        let toml = r#"
scratch_dir = "/tmp/ds"

[server]
command = ["node", "dist/server.js"]

[compiler]
command = ["npx", "babel", "{input}"]
passthrough = false

[data_source]
source_subdir = "src"
schema_extensions = ["graphql", "gql"]
module_extensions = ["js"]
"#;
        let config: ServiceConfig = toml::from_str(toml).expect("parse");
        assert_eq!(config.scratch_dir, Some(PathBuf::from("/tmp/ds")));
        assert_eq!(
            config.server.as_ref().and_then(|s| s.command.clone()),
            Some(vec!["node".to_string(), "dist/server.js".to_string()])
        );
        assert_eq!(
            config.compiler.as_ref().and_then(|c| c.passthrough),
            Some(false)
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_fields() {
        let result: Result<ServiceConfig, _> = toml::from_str("unknown = 1");
        assert!(result.is_err());
    }

    #[test]
    fn rejects_empty_server_command() {
        let config = ServiceConfig {
            server: Some(ServerConfig {
                command: Some(vec![]),
            }),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("server.command"));
    }

    #[test]
    fn rejects_blank_compiler_program() {
        let config = CompilerConfig {
            command: Some(vec!["  ".into(), "{input}".into()]),
            passthrough: None,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_dotted_extension() {
        let config = DataSourceConfig {
            schema_extensions: Some(vec![".graphql".into()]),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains(".graphql"));
    }

    #[test]
    fn rejects_empty_extension_list() {
        let config = DataSourceConfig {
            module_extensions: Some(vec![]),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_shared_extension() {
        let config = DataSourceConfig {
            schema_extensions: Some(vec!["js".into()]),
            module_extensions: Some(vec!["js".into()]),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("both"));
    }

    #[test]
    fn rejects_escaping_subdir() {
        for subdir in ["../outside", "/abs", ""] {
            let config = DataSourceConfig {
                source_subdir: Some(subdir.into()),
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{:?} should be rejected", subdir);
        }
    }

    #[test]
    fn accepts_nested_subdir() {
        let config = DataSourceConfig {
            source_subdir: Some("lib/src".into()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
