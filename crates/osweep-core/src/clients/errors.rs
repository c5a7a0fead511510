//! Backend client error taxonomy.
//!
//! `Clone` so the in-memory backend can queue scripted failures, and so
//! the instance retry can inspect then re-surface the same error.

#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    #[error("Resource '{identifier}' not found")]
    NotFound { identifier: String },

    /// The instance is in a state the backend refuses to delete from.
    /// The instance manager keys its reset-and-retry on this variant.
    #[error("Invalid state for this operation: {message}")]
    InvalidState { message: String },

    #[error("Backend request failed: {message}")]
    Api { message: String },

    #[error("Authentication rejected: {message}")]
    Unauthorized { message: String },

    #[error("Backend call timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let error = ClientError::NotFound {
            identifier: "srv-1".to_string(),
        };
        assert_eq!(error.to_string(), "Resource 'srv-1' not found");
    }

    #[test]
    fn test_invalid_state_display() {
        let error = ClientError::InvalidState {
            message: "task_state is deleting".to_string(),
        };
        assert!(error.to_string().contains("Invalid state"));
    }
}
