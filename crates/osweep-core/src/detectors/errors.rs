//! Policy resolution error types.
//!
//! All of these fire at configuration-application time, before any
//! backend call: acting on a half-valid policy is how tenants lose
//! resources they wanted kept.

use crate::errors::SweepError;
use crate::models::ResourceKind;

#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("Invalid exclude pattern '{pattern}' for {kind}: {message}")]
    InvalidExcludePattern {
        kind: ResourceKind,
        pattern: String,
        message: String,
    },

    #[error("remove-if-older-than for {kind} must be greater than zero")]
    ZeroMinimumAge { kind: ResourceKind },

    #[error("remove-if-older-than for {kind} is out of range: {message}")]
    MinimumAgeOutOfRange {
        kind: ResourceKind,
        message: String,
    },

    #[error("Option '{option}' is not supported for {kind}")]
    UnsupportedOption {
        kind: ResourceKind,
        option: &'static str,
    },
}

impl SweepError for PolicyError {
    fn error_code(&self) -> &'static str {
        match self {
            PolicyError::InvalidExcludePattern { .. } => "POLICY_INVALID_EXCLUDE",
            PolicyError::ZeroMinimumAge { .. } => "POLICY_ZERO_MINIMUM_AGE",
            PolicyError::MinimumAgeOutOfRange { .. } => "POLICY_MINIMUM_AGE_OUT_OF_RANGE",
            PolicyError::UnsupportedOption { .. } => "POLICY_UNSUPPORTED_OPTION",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_exclude_pattern_display() {
        let error = PolicyError::InvalidExcludePattern {
            kind: ResourceKind::Image,
            pattern: "[unclosed".to_string(),
            message: "unclosed character class".to_string(),
        };
        assert!(error.to_string().contains("[unclosed"));
        assert_eq!(error.error_code(), "POLICY_INVALID_EXCLUDE");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_unsupported_option_display() {
        let error = PolicyError::UnsupportedOption {
            kind: ResourceKind::Instance,
            option: "remove-only-if-unused",
        };
        assert_eq!(
            error.to_string(),
            "Option 'remove-only-if-unused' is not supported for instance"
        );
    }
}
