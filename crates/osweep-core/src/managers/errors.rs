//! Resource manager error types.

use crate::clients::ClientError;
use crate::errors::SweepError;
use crate::models::ResourceKind;

#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    #[error("{kind} '{identifier}' was not found")]
    NotFound {
        kind: ResourceKind,
        identifier: String,
    },

    /// A raw record could not be converted into the domain model. Fatal
    /// for that single record; `get_all` skips it with a warning.
    #[error("Failed to convert raw {kind} record: {message}")]
    Conversion {
        kind: ResourceKind,
        message: String,
    },

    #[error("Failed to delete {kind} '{identifier}': {source}")]
    Deletion {
        kind: ResourceKind,
        identifier: String,
        source: ClientError,
    },

    #[error("Backend call failed for {kind}: {source}")]
    Backend {
        kind: ResourceKind,
        source: ClientError,
    },

    #[error("Failed to resolve '{service}' endpoint: {source}")]
    EndpointResolution {
        service: String,
        source: ClientError,
    },
}

impl SweepError for ManagerError {
    fn error_code(&self) -> &'static str {
        match self {
            ManagerError::NotFound { .. } => "RESOURCE_NOT_FOUND",
            ManagerError::Conversion { .. } => "RAW_CONVERSION_FAILED",
            ManagerError::Deletion { .. } => "DELETION_FAILED",
            ManagerError::Backend { .. } => "BACKEND_CALL_FAILED",
            ManagerError::EndpointResolution { .. } => "ENDPOINT_RESOLUTION_FAILED",
        }
    }
}
