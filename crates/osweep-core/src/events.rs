//! Structured event helpers shared by the CLI entry points.

use tracing::{error, warn};

use crate::errors::SweepError;

/// Log an application error with its code, at a severity matching whose
/// fault it is.
pub fn log_app_error<E: SweepError>(error: &E) {
    if error.is_user_error() {
        warn!(
            event = "app.user_error",
            code = error.error_code(),
            error = %error
        );
    } else {
        error!(
            event = "app.error",
            code = error.error_code(),
            error = %error
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConfigError;

    #[test]
    fn test_log_app_error_does_not_panic() {
        let error = ConfigError::InvalidConfiguration {
            message: "at least one [[cleanup]] group is required".to_string(),
        };
        log_app_error(&error);
    }
}
