//! runtime::catalog
//!
//! Listing of a staged data source directory.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::types::DataSourceLayout;
use crate::fs::{FileSystem, FsError};

/// Schema files and compiled modules found in a staged directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataSourceCatalog {
    pub dir: PathBuf,
    /// Schema files, sorted.
    pub schemas: Vec<PathBuf>,
    /// Compiled resolver modules, sorted.
    pub modules: Vec<PathBuf>,
}

impl DataSourceCatalog {
    /// List `dir` using the layout's extensions. Other files are ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use gql_bootstrap::core::types::DataSourceLayout;
    /// use gql_bootstrap::fs::MemoryFileSystem;
    /// use gql_bootstrap::runtime::DataSourceCatalog;
    /// use std::path::Path;
    ///
    /// let fs = MemoryFileSystem::new()
    ///     .with_file("/tmp/ds/a.graphql", "")
    ///     .with_file("/tmp/ds/b.js", "")
    ///     .with_file("/tmp/ds/notes.txt", "");
    /// let catalog =
    ///     DataSourceCatalog::load(Path::new("/tmp/ds"), &fs, &DataSourceLayout::default()).unwrap();
    /// assert_eq!(catalog.schemas.len(), 1);
    /// assert_eq!(catalog.modules.len(), 1);
    /// ```
    pub fn load(
        dir: &Path,
        fs: &dyn FileSystem,
        layout: &DataSourceLayout,
    ) -> Result<Self, FsError> {
        let files = fs.list_files(dir)?;
        let (schemas, rest): (Vec<_>, Vec<_>) =
            files.into_iter().partition(|f| layout.is_schema(f));
        let modules = rest.into_iter().filter(|f| layout.is_module(f)).collect();

        Ok(Self {
            dir: dir.to_path_buf(),
            schemas,
            modules,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty() && self.modules.is_empty()
    }
}

impl fmt::Display for DataSourceCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "data sources: {}", self.dir.display())?;
        for schema in &self.schemas {
            writeln!(f, "  schema: {}", file_name(schema))?;
        }
        for module in &self.modules {
            writeln!(f, "  module: {}", file_name(module))?;
        }
        Ok(())
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
