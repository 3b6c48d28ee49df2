//! engine::stage
//!
//! Staging of a mock data source into the scratch directory.
//!
//! # Procedure
//!
//! Given a data source directory with a `src/` folder:
//!
//! 1. Recreate the scratch directory empty (delete, then create)
//! 2. Copy every schema file in `src/` verbatim
//! 3. Compile every source module in `src/` and write the output under
//!    the same file name
//!
//! The result is a flat directory the server finds through
//! `GQL_DATA_SOURCES`.
//!
//! # Invariants
//!
//! - The scratch directory is empty when copying begins; nothing from a
//!   previous run survives
//! - The scratch directory never overlaps the data source, so the
//!   destructive recreate cannot touch source files
//! - The scratch directory is never the file-system root and never
//!   contains the service root
//! - Any failing file aborts the whole run; there is no partial success
//!
//! # Example
//!
//! ```
//! use gql_bootstrap::compile::MockCompiler;
//! use gql_bootstrap::core::types::DataSourceLayout;
//! use gql_bootstrap::engine::stage::{StageOutcome, Stager};
//! use gql_bootstrap::fs::MemoryFileSystem;
//! use gql_bootstrap::ui::output::Verbosity;
//! use std::path::Path;
//!
//! let fs = MemoryFileSystem::new()
//!     .with_file("/fixtures/mock/src/a.graphql", "type Query { a: Int }")
//!     .with_file("/fixtures/mock/src/b.js", "export default {}");
//! let compiler = MockCompiler::new();
//! let layout = DataSourceLayout::default();
//! let stager = Stager::new(&fs, &compiler, &layout, Verbosity::Quiet);
//!
//! let outcome = stager
//!     .stage(Some(Path::new("/fixtures/mock")), Path::new("/tmp/scratch"))
//!     .unwrap();
//! let report = match outcome {
//!     StageOutcome::Staged(report) => report,
//!     StageOutcome::Skipped(reason) => panic!("skipped: {}", reason),
//! };
//! assert_eq!(report.schemas, vec!["a.graphql"]);
//! assert_eq!(report.modules, vec!["b.js"]);
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::compile::{CompileError, ModuleCompiler};
use crate::core::paths;
use crate::core::types::{DataSourceLayout, DataSourcePaths};
use crate::fs::{FileSystem, FsError};
use crate::ui::output::{self, Verbosity};

/// Shown whenever a data source is staged.
pub const MOCK_NOTICE: &[&str] = &[
    "Mock data sources are for local development only.",
    "They are not supported in production deployments.",
];

/// Errors from staging. Any of them aborts the run.
#[derive(Debug, Error)]
pub enum StageError {
    /// The scratch directory would wipe (part of) the data source.
    #[error(
        "scratch directory '{}' overlaps data source '{}'",
        .scratch_dir.display(),
        .source_dir.display()
    )]
    ScratchOverlapsSource {
        scratch_dir: PathBuf,
        source_dir: PathBuf,
    },

    /// The scratch directory is the file-system root.
    #[error("scratch directory '{}' is the file-system root", .0.display())]
    ScratchIsFilesystemRoot(PathBuf),

    /// Recreating the scratch directory would delete the service.
    #[error(
        "scratch directory '{}' contains service root '{}'",
        .scratch_dir.display(),
        .service_root.display()
    )]
    ScratchContainsServiceRoot {
        scratch_dir: PathBuf,
        service_root: PathBuf,
    },

    /// The scratch directory could not be recreated.
    #[error("failed to prepare scratch directory: {0}")]
    Recreate(#[source] FsError),

    /// The source folder could not be listed.
    #[error("failed to list data source files: {0}")]
    List(#[source] FsError),

    /// A schema file could not be copied.
    #[error("failed to stage schema '{file}': {source}")]
    Copy { file: String, source: FsError },

    /// A module failed to compile.
    #[error("failed to compile module '{file}': {source}")]
    Compile { file: String, source: CompileError },

    /// A compiled module could not be written.
    #[error("failed to write compiled module '{file}': {source}")]
    Write { file: String, source: FsError },
}

/// Why nothing was staged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No data source directory was given.
    NotRequested,
    /// Data sources are not used in live mode.
    LiveMode(PathBuf),
    /// The path is not an existing directory.
    NotADirectory(PathBuf),
    /// The directory has no source folder.
    MissingSourceFolder(PathBuf),
}

impl SkipReason {
    /// Whether the skip deserves a warning.
    pub fn is_warning(&self) -> bool {
        !matches!(self, SkipReason::NotRequested)
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotRequested => write!(f, "no data source directory given"),
            SkipReason::LiveMode(path) => write!(
                f,
                "data source '{}' is ignored in live mode",
                path.display()
            ),
            SkipReason::NotADirectory(path) => write!(
                f,
                "data source '{}' is not a directory, running without it",
                path.display()
            ),
            SkipReason::MissingSourceFolder(path) => write!(
                f,
                "data source has no '{}' folder, running without it",
                path.display()
            ),
        }
    }
}

/// What a successful staging run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub paths: DataSourcePaths,
    /// Schema file names copied, in staging order.
    pub schemas: Vec<String>,
    /// Module file names compiled, in staging order.
    pub modules: Vec<String>,
}

/// Result of a staging attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    Staged(StageReport),
    Skipped(SkipReason),
}

impl StageOutcome {
    /// Paths of the staged data source, if staging happened.
    pub fn paths(&self) -> Option<&DataSourcePaths> {
        match self {
            StageOutcome::Staged(report) => Some(&report.paths),
            StageOutcome::Skipped(_) => None,
        }
    }
}

/// Stages data sources through the file-system and compile capabilities.
pub struct Stager<'a> {
    fs: &'a dyn FileSystem,
    compiler: &'a dyn ModuleCompiler,
    layout: &'a DataSourceLayout,
    service_root: Option<&'a Path>,
    verbosity: Verbosity,
}

impl<'a> Stager<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        compiler: &'a dyn ModuleCompiler,
        layout: &'a DataSourceLayout,
        verbosity: Verbosity,
    ) -> Self {
        Self {
            fs,
            compiler,
            layout,
            service_root: None,
            verbosity,
        }
    }

    /// Refuse scratch directories that equal or contain `service_root`.
    pub fn protecting(mut self, service_root: &'a Path) -> Self {
        self.service_root = Some(service_root);
        self
    }

    /// Check preconditions without touching anything.
    ///
    /// Returns the absolute source directory to stage, or why to skip.
    /// Both paths must already be absolute.
    pub fn check(
        &self,
        source: Option<&Path>,
        scratch_dir: &Path,
    ) -> Result<Result<PathBuf, SkipReason>, StageError> {
        let source = match source {
            Some(path) if !path.as_os_str().is_empty() => paths::normalize(path),
            _ => return Ok(Err(SkipReason::NotRequested)),
        };

        if !self.fs.is_dir(&source) {
            return Ok(Err(SkipReason::NotADirectory(source)));
        }

        let src = self.layout.source_files_dir(&source);
        if !self.fs.is_dir(&src) {
            return Ok(Err(SkipReason::MissingSourceFolder(src)));
        }

        let scratch = paths::normalize(scratch_dir);
        if scratch.parent().is_none() {
            return Err(StageError::ScratchIsFilesystemRoot(scratch));
        }
        if paths::overlaps(&source, &scratch) {
            return Err(StageError::ScratchOverlapsSource {
                scratch_dir: scratch,
                source_dir: source,
            });
        }
        if let Some(root) = self.service_root.map(paths::normalize) {
            if root.starts_with(&scratch) {
                return Err(StageError::ScratchContainsServiceRoot {
                    scratch_dir: scratch,
                    service_root: root,
                });
            }
        }

        Ok(Ok(source))
    }

    /// Stage `source` into `scratch_dir`.
    ///
    /// Skips (with a warning unless not requested) when the source is
    /// absent or unusable.
    pub fn stage(
        &self,
        source: Option<&Path>,
        scratch_dir: &Path,
    ) -> Result<StageOutcome, StageError> {
        let source_dir = match self.check(source, scratch_dir)? {
            Ok(dir) => dir,
            Err(reason) => {
                if reason.is_warning() {
                    output::warn(&reason, self.verbosity);
                }
                tracing::debug!(%reason, "staging skipped");
                return Ok(StageOutcome::Skipped(reason));
            }
        };
        let scratch_dir = paths::normalize(scratch_dir);

        output::notice(MOCK_NOTICE, self.verbosity);

        output::step(
            format!("Preparing scratch directory {}", scratch_dir.display()),
            self.verbosity,
        );
        self.fs
            .recreate_dir(&scratch_dir)
            .map_err(StageError::Recreate)?;

        let src = self.layout.source_files_dir(&source_dir);
        let files = self.fs.list_files(&src).map_err(StageError::List)?;

        output::step("Copying schema files", self.verbosity);
        let mut schemas = Vec::new();
        for file in files.iter().filter(|f| self.layout.is_schema(f)) {
            let name = file_name(file);
            self.fs
                .copy_file(file, &scratch_dir.join(&name))
                .map_err(|source| StageError::Copy {
                    file: name.clone(),
                    source,
                })?;
            output::print(format!("    {}", name), self.verbosity);
            schemas.push(name);
        }

        output::step(
            format!("Compiling source modules with {}", self.compiler.name()),
            self.verbosity,
        );
        let mut modules = Vec::new();
        for file in files.iter().filter(|f| self.layout.is_module(f)) {
            let name = file_name(file);
            let compiled = self
                .compiler
                .compile(file)
                .map_err(|source| StageError::Compile {
                    file: name.clone(),
                    source,
                })?;
            self.fs
                .write_file(&scratch_dir.join(&name), compiled.as_bytes())
                .map_err(|source| StageError::Write {
                    file: name.clone(),
                    source,
                })?;
            output::print(format!("    {}", name), self.verbosity);
            modules.push(name);
        }

        tracing::debug!(
            schemas = schemas.len(),
            modules = modules.len(),
            scratch = %scratch_dir.display(),
            "data source staged"
        );

        Ok(StageOutcome::Staged(StageReport {
            paths: DataSourcePaths::new(source_dir, scratch_dir),
            schemas,
            modules,
        }))
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::MockCompiler;
    use crate::fs::MemoryFileSystem;

    const SOURCE: &str = "/work/fixtures/mock";
    const SCRATCH: &str = "/tmp/gql-bootstrap/data-sources";

    fn fixture() -> MemoryFileSystem {
        MemoryFileSystem::new()
            .with_file("/work/fixtures/mock/src/a.graphql", "type Query { a: Int }\n")
            .with_file("/work/fixtures/mock/src/b.js", "export const b = () => 1;\n")
            .with_file("/work/fixtures/mock/src/README.md", "docs")
            .with_file("/work/fixtures/mock/src/nested/c.js", "ignored")
    }

    fn stage_with(
        fs: &MemoryFileSystem,
        compiler: &MockCompiler,
        source: Option<&str>,
    ) -> Result<StageOutcome, StageError> {
        let layout = DataSourceLayout::default();
        Stager::new(fs, compiler, &layout, Verbosity::Quiet)
            .stage(source.map(Path::new), Path::new(SCRATCH))
    }

    fn staged(outcome: StageOutcome) -> StageReport {
        match outcome {
            StageOutcome::Staged(report) => report,
            StageOutcome::Skipped(reason) => panic!("unexpected skip: {}", reason),
        }
    }

    mod skipping {
        use super::*;

        #[test]
        fn no_source_is_silent_noop() {
            let fs = fixture();
            let outcome = stage_with(&fs, &MockCompiler::new(), None).unwrap();
            assert_eq!(outcome, StageOutcome::Skipped(SkipReason::NotRequested));
            assert!(!fs.exists(Path::new(SCRATCH)));
        }

        #[test]
        fn empty_source_is_silent_noop() {
            let fs = fixture();
            let outcome = stage_with(&fs, &MockCompiler::new(), Some("")).unwrap();
            assert_eq!(outcome, StageOutcome::Skipped(SkipReason::NotRequested));
            assert!(!SkipReason::NotRequested.is_warning());
        }

        #[test]
        fn missing_directory_is_warned_noop() {
            let fs = fixture();
            let outcome = stage_with(&fs, &MockCompiler::new(), Some("/work/nope")).unwrap();
            let reason = match outcome {
                StageOutcome::Skipped(reason) => reason,
                other => panic!("expected skip, got {:?}", other),
            };
            assert_eq!(reason, SkipReason::NotADirectory(PathBuf::from("/work/nope")));
            assert!(reason.is_warning());
            assert!(!fs.exists(Path::new(SCRATCH)));
        }

        #[test]
        fn file_instead_of_directory_is_skipped() {
            let fs = fixture();
            let outcome = stage_with(
                &fs,
                &MockCompiler::new(),
                Some("/work/fixtures/mock/src/a.graphql"),
            )
            .unwrap();
            assert!(matches!(
                outcome,
                StageOutcome::Skipped(SkipReason::NotADirectory(_))
            ));
        }

        #[test]
        fn missing_src_folder_is_skipped() {
            let fs = MemoryFileSystem::new().with_file("/work/other/a.graphql", "");
            let outcome = stage_with(&fs, &MockCompiler::new(), Some("/work/other")).unwrap();
            assert_eq!(
                outcome,
                StageOutcome::Skipped(SkipReason::MissingSourceFolder(PathBuf::from(
                    "/work/other/src"
                )))
            );
            assert!(!fs.exists(Path::new(SCRATCH)));
        }
    }

    mod staging {
        use super::*;

        #[test]
        fn copies_schemas_and_compiles_modules() {
            let fs = fixture();
            let compiler = MockCompiler::new();
            let report = staged(stage_with(&fs, &compiler, Some(SOURCE)).unwrap());

            assert_eq!(report.schemas, vec!["a.graphql"]);
            assert_eq!(report.modules, vec!["b.js"]);
            assert_eq!(report.paths.source_dir, PathBuf::from(SOURCE));
            assert_eq!(report.paths.scratch_dir, PathBuf::from(SCRATCH));

            assert_eq!(
                fs.contents(Path::new("/tmp/gql-bootstrap/data-sources/a.graphql")),
                Some(b"type Query { a: Int }\n".to_vec())
            );
            assert_eq!(
                fs.contents(Path::new("/tmp/gql-bootstrap/data-sources/b.js")),
                Some(MockCompiler::expected_output("b.js").into_bytes())
            );
            assert_eq!(
                compiler.calls(),
                vec![PathBuf::from("/work/fixtures/mock/src/b.js")]
            );
        }

        #[test]
        fn scratch_holds_exactly_staged_files() {
            let fs = fixture();
            staged(stage_with(&fs, &MockCompiler::new(), Some(SOURCE)).unwrap());

            assert_eq!(
                fs.files_under(Path::new(SCRATCH)),
                vec![
                    PathBuf::from("/tmp/gql-bootstrap/data-sources/a.graphql"),
                    PathBuf::from("/tmp/gql-bootstrap/data-sources/b.js"),
                ]
            );
        }

        #[test]
        fn stale_files_are_removed() {
            let fs = fixture()
                .with_file("/tmp/gql-bootstrap/data-sources/old.graphql", "stale")
                .with_file("/tmp/gql-bootstrap/data-sources/deep/old.js", "stale");
            staged(stage_with(&fs, &MockCompiler::new(), Some(SOURCE)).unwrap());

            assert_eq!(fs.files_under(Path::new(SCRATCH)).len(), 2);
            assert!(!fs.exists(Path::new("/tmp/gql-bootstrap/data-sources/old.graphql")));
        }

        #[test]
        fn restaging_is_idempotent() {
            let fs = fixture();
            let first = staged(stage_with(&fs, &MockCompiler::new(), Some(SOURCE)).unwrap());
            let after_first = fs.files_under(Path::new(SCRATCH));
            let second = staged(stage_with(&fs, &MockCompiler::new(), Some(SOURCE)).unwrap());

            assert_eq!(first, second);
            assert_eq!(fs.files_under(Path::new(SCRATCH)), after_first);
        }

        #[test]
        fn relative_components_are_normalized() {
            let fs = fixture();
            let report = staged(
                stage_with(&fs, &MockCompiler::new(), Some("/work/fixtures/./mock")).unwrap(),
            );
            assert_eq!(report.paths.source_dir, PathBuf::from(SOURCE));
        }

        #[test]
        fn empty_src_stages_empty_scratch() {
            let fs = MemoryFileSystem::new().with_dir("/work/empty/src");
            let report =
                staged(stage_with(&fs, &MockCompiler::new(), Some("/work/empty")).unwrap());
            assert!(report.schemas.is_empty());
            assert!(report.modules.is_empty());
            assert!(fs.is_dir(Path::new(SCRATCH)));
        }

        #[test]
        fn custom_layout_is_honored() {
            let fs = MemoryFileSystem::new()
                .with_file("/ds/lib/a.gql", "type A { id: ID }")
                .with_file("/ds/lib/b.mjs", "export {}")
                .with_file("/ds/lib/c.js", "ignored");
            let layout = DataSourceLayout {
                source_subdir: PathBuf::from("lib"),
                schema_extensions: vec!["gql".into()],
                module_extensions: vec!["mjs".into()],
            };
            let compiler = MockCompiler::new();
            let report = staged(
                Stager::new(&fs, &compiler, &layout, Verbosity::Quiet)
                    .stage(Some(Path::new("/ds")), Path::new("/scratch"))
                    .unwrap(),
            );
            assert_eq!(report.schemas, vec!["a.gql"]);
            assert_eq!(report.modules, vec!["b.mjs"]);
        }
    }

    mod failures {
        use super::*;

        #[test]
        fn compile_failure_aborts() {
            let fs = fixture();
            let err = stage_with(&fs, &MockCompiler::new().fail_on("b.js"), Some(SOURCE))
                .unwrap_err();
            match err {
                StageError::Compile { file, .. } => assert_eq!(file, "b.js"),
                other => panic!("unexpected error: {:?}", other),
            }
            assert!(!fs.exists(Path::new("/tmp/gql-bootstrap/data-sources/b.js")));
        }

        #[test]
        fn copy_failure_aborts_before_compiling() {
            let fs = fixture().fail_on_write("/tmp/gql-bootstrap/data-sources/a.graphql");
            let compiler = MockCompiler::new();
            let err = stage_with(&fs, &compiler, Some(SOURCE)).unwrap_err();
            assert!(matches!(err, StageError::Copy { ref file, .. } if file == "a.graphql"));
            assert!(compiler.calls().is_empty());
        }

        #[test]
        fn write_failure_names_module() {
            let fs = fixture().fail_on_write("/tmp/gql-bootstrap/data-sources/b.js");
            let err = stage_with(&fs, &MockCompiler::new(), Some(SOURCE)).unwrap_err();
            assert!(err.to_string().contains("b.js"));
        }

        #[test]
        fn scratch_inside_source_is_refused() {
            let fs = fixture();
            let layout = DataSourceLayout::default();
            let compiler = MockCompiler::new();
            let err = Stager::new(&fs, &compiler, &layout, Verbosity::Quiet)
                .stage(
                    Some(Path::new(SOURCE)),
                    Path::new("/work/fixtures/mock/build"),
                )
                .unwrap_err();
            assert!(matches!(err, StageError::ScratchOverlapsSource { .. }));
            // the source was not touched
            assert!(fs.exists(Path::new("/work/fixtures/mock/src/a.graphql")));
        }

        fn service() -> MemoryFileSystem {
            fixture()
                .with_file("/srv/app/dist/server.js", "listen()")
                .with_file("/srv/app/gql-bootstrap.toml", "")
        }

        fn stage_protected(
            fs: &MemoryFileSystem,
            scratch: &str,
        ) -> Result<StageOutcome, StageError> {
            let layout = DataSourceLayout::default();
            let compiler = MockCompiler::new();
            Stager::new(fs, &compiler, &layout, Verbosity::Quiet)
                .protecting(Path::new("/srv/app"))
                .stage(Some(Path::new(SOURCE)), Path::new(scratch))
        }

        #[test]
        fn scratch_equal_to_service_root_is_refused() {
            let fs = service();
            let err = stage_protected(&fs, "/srv/app").unwrap_err();
            assert!(matches!(err, StageError::ScratchContainsServiceRoot { .. }));
            assert!(fs.exists(Path::new("/srv/app/dist/server.js")));
            assert!(fs.exists(Path::new("/srv/app/gql-bootstrap.toml")));
        }

        #[test]
        fn scratch_above_service_root_is_refused() {
            let fs = service();
            let err = stage_protected(&fs, "/srv/app/..").unwrap_err();
            match err {
                StageError::ScratchContainsServiceRoot {
                    scratch_dir,
                    service_root,
                } => {
                    assert_eq!(scratch_dir, PathBuf::from("/srv"));
                    assert_eq!(service_root, PathBuf::from("/srv/app"));
                }
                other => panic!("unexpected error: {:?}", other),
            }
            assert!(fs.exists(Path::new("/srv/app/dist/server.js")));
        }

        #[test]
        fn scratch_inside_service_root_is_allowed() {
            let fs = service();
            let report = staged(stage_protected(&fs, "/srv/app/.staging").unwrap());
            assert_eq!(report.schemas, vec!["a.graphql"]);
            assert!(fs.exists(Path::new("/srv/app/dist/server.js")));
        }

        #[test]
        fn filesystem_root_is_refused() {
            let fs = fixture();
            let err = stage_with_scratch(&fs, "/").unwrap_err();
            assert!(matches!(err, StageError::ScratchIsFilesystemRoot(_)));
            assert!(fs.exists(Path::new("/work/fixtures/mock/src/a.graphql")));
        }

        fn stage_with_scratch(
            fs: &MemoryFileSystem,
            scratch: &str,
        ) -> Result<StageOutcome, StageError> {
            let layout = DataSourceLayout::default();
            let compiler = MockCompiler::new();
            Stager::new(fs, &compiler, &layout, Verbosity::Quiet)
                .stage(Some(Path::new(SOURCE)), Path::new(scratch))
        }

        #[test]
        fn scratch_containing_source_is_refused() {
            let fs = fixture();
            let layout = DataSourceLayout::default();
            let compiler = MockCompiler::new();
            let err = Stager::new(&fs, &compiler, &layout, Verbosity::Quiet)
                .stage(Some(Path::new(SOURCE)), Path::new("/work"))
                .unwrap_err();
            assert!(matches!(err, StageError::ScratchOverlapsSource { .. }));
        }
    }
}
