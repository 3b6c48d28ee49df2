//! core
//!
//! Core domain types, configuration and path handling.
//!
//! # Modules
//!
//! - [`types`] - Strong types: RunMode, DataSourcePaths, EnvAssignment, etc.
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Path resolution and the default scratch location
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing

pub mod config;
pub mod paths;
pub mod types;
