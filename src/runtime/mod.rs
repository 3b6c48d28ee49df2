//! runtime
//!
//! The service side of the bootstrap conventions.
//!
//! The launcher hands the server three environment variables. This module
//! reads them back and lists what a staged data source directory offers,
//! the way the running service discovers its schema files and resolver
//! modules.
//!
//! - [`RuntimeEnv`] - The mode, data source directory and private config
//! - [`DataSourceCatalog`] - Staged schema files and compiled modules

mod catalog;
mod env;

pub use catalog::DataSourceCatalog;
pub use env::RuntimeEnv;
