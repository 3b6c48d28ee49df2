//! process
//!
//! Process spawn capability.
//!
//! # Architecture
//!
//! The server is started from a [`LaunchSpec`] through the
//! `ProcessSpawner` trait:
//!
//! - [`SystemSpawner`]: `std::process::Command`, waits for the child
//! - [`RecordingSpawner`]: Records specs without starting anything (tests)
//!
//! The bootstrapper never changes its own working directory or
//! environment; both are applied to the child command.

mod mock;
mod spec;
mod system;
mod traits;

pub use mock::RecordingSpawner;
pub use spec::LaunchSpec;
pub use system::SystemSpawner;
pub use traits::{ProcessSpawner, SpawnError};
