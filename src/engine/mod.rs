//! engine
//!
//! Orchestrates a bootstrap run: Gate -> Stage -> Compose -> Launch.
//!
//! # Architecture
//!
//! 1. **Gate**: Decide whether the run may start in the selected mode
//! 2. **Stage**: Copy and compile a mock data source into the scratch directory
//! 3. **Compose**: Map resolved paths to environment assignments
//! 4. **Launch**: Build the launch spec and run the server
//!
//! # Invariants
//!
//! - Every side effect goes through a capability trait ([`crate::fs`],
//!   [`crate::compile`], [`crate::process`])
//! - Gating always happens before staging or launching
//! - The engine holds no state between runs

pub mod env;
pub mod gate;
pub mod launch;
pub mod runner;
pub mod stage;

pub use gate::{gate, GateError, GatePass};
pub use launch::{build_launch_spec, launch, LaunchError, LaunchSpec};
pub use runner::{run, Capabilities, RunError, RunOutcome, RunRequest};
pub use stage::{SkipReason, StageError, StageOutcome, StageReport, Stager};
