use std::error::Error;

// Re-export ConfigError so callers get the whole taxonomy from one place
pub use osweep_config::ConfigError;

/// Base trait for all application errors
pub trait SweepError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

/// Common result type for the application
pub type SweepResult<T> = Result<T, Box<dyn SweepError>>;

impl SweepError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ConfigNotFound { .. } => "CONFIG_NOT_FOUND",
            ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ConfigError::ConfigParseError { .. } | ConfigError::InvalidConfiguration { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_result() {
        let _result: SweepResult<i32> = Ok(42);
    }

    #[test]
    fn test_config_error_codes() {
        let error = ConfigError::InvalidConfiguration {
            message: "at least one [[cleanup]] group is required".to_string(),
        };
        assert_eq!(error.error_code(), "INVALID_CONFIGURATION");
        assert!(error.is_user_error());

        let error = ConfigError::ConfigNotFound {
            path: "osweep.toml".to_string(),
        };
        assert_eq!(error.error_code(), "CONFIG_NOT_FOUND");
        assert!(!error.is_user_error());
    }
}
