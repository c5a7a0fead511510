//! osweep-core
//!
//! The decision and orchestration layer of the tenant sweeper:
//! - **models**: the managed resource entities and their identity rules
//! - **clients**: backend port traits, raw record shapes, the in-memory
//!   fixture backend, and the backend registry
//! - **managers**: one manager per resource kind over a uniform
//!   list/get/delete contract, with kind-specific deletion quirks
//! - **detectors**: pure prevent-delete predicates and policy resolution
//! - **cleanup**: the cycle orchestrator (fetch → evaluate → delete →
//!   report)

pub mod cleanup;
pub mod clients;
pub mod detectors;
pub mod errors;
pub mod events;
pub mod logging;
pub mod managers;
pub mod models;

// Public API exports
pub use cleanup::{CycleError, CycleOptions, CycleSummary, OutcomeAction, ResourceOutcome, run_cycle};
pub use clients::{TenantClients, build_backend, credentials_for_group};
pub use detectors::{CleanupPolicy, PolicyError, resolve_policy};
pub use errors::{SweepError, SweepResult};
pub use logging::init_logging;
pub use models::{Credentials, ResourceKind};
