//! gql-bootstrap - Stage mock data sources and start a GraphQL service
//!
//! gql-bootstrap is a single-binary launcher for a GraphQL microservice. It
//! selects a live or mock mode, optionally compiles a local data source into
//! a scratch directory, and starts the real server with the environment it
//! expects (`NODE_ENV`, `GQL_DATA_SOURCES`, `APP_ENV_PRIVATE`).
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Orchestrates Gate → Stage → Compose → Launch
//! - [`core`] - Domain types, configuration and paths
//! - [`fs`] - File-system capability
//! - [`compile`] - Module compile capability
//! - [`process`] - Process spawn capability
//! - [`runtime`] - Server-side view of the bootstrap environment
//! - [`ui`] - Console output and logging
//!
//! # Correctness Invariants
//!
//! 1. A live run never starts without a readable private config file
//! 2. Nothing is staged or spawned before the mode gate passes
//! 3. The scratch directory is empty before staging begins
//! 4. The bootstrapper never mutates its own working directory or environment

pub mod cli;
pub mod compile;
pub mod core;
pub mod engine;
pub mod fs;
pub mod process;
pub mod runtime;
pub mod ui;
