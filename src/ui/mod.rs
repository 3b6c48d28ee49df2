//! ui
//!
//! User-facing output and logging.
//!
//! # Modules
//!
//! - [`output`] - Progress, warnings, errors and notices on the console
//! - [`logging`] - `tracing` subscriber setup for developer logs
//!
//! # Design
//!
//! All console output goes through this module so the quiet flag is
//! honored in one place.

pub mod logging;
pub mod output;
