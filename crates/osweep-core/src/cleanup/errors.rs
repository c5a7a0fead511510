//! Cycle-level error types.
//!
//! Per-resource failures never show up here; they are recorded in the
//! cycle's outcome list. These variants are the connectivity-level
//! failures that invalidate the whole cycle.

use crate::errors::SweepError;
use crate::managers::ManagerError;
use crate::models::ResourceKind;

#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    #[error("Failed to snapshot {kind} resources: {source}")]
    Snapshot {
        kind: ResourceKind,
        source: ManagerError,
    },

    #[error("Failed to construct {kind} manager: {source}")]
    Manager {
        kind: ResourceKind,
        source: ManagerError,
    },
}

impl SweepError for CycleError {
    fn error_code(&self) -> &'static str {
        match self {
            CycleError::Snapshot { .. } => "CYCLE_SNAPSHOT_FAILED",
            CycleError::Manager { .. } => "CYCLE_MANAGER_FAILED",
        }
    }
}
