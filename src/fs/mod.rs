//! fs
//!
//! File-system capability.
//!
//! # Architecture
//!
//! Staging and gating reach the disk only through the `FileSystem` trait:
//!
//! - [`LocalFileSystem`]: `std::fs` (used by the CLI)
//! - [`MemoryFileSystem`]: In-memory maps with failure injection (tests)
//!
//! Every error carries the operation and the path it failed on, so a
//! staging abort always names the offending file.

mod local;
mod memory;
mod traits;

pub use local::LocalFileSystem;
pub use memory::MemoryFileSystem;
pub use traits::{FileSystem, FsError};
