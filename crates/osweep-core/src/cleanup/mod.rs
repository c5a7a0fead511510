pub mod errors;
pub mod handler;
pub mod types;

// Public API exports
pub use errors::CycleError;
pub use handler::run_cycle;
pub use types::{CycleOptions, CycleSummary, OutcomeAction, ResourceOutcome};
