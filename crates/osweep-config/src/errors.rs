#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found at '{path}'")]
    ConfigNotFound { path: String },

    #[error("Failed to parse config file: {message}")]
    ConfigParseError { message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("IO error reading config: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_display() {
        let error = ConfigError::ConfigNotFound {
            path: "/etc/osweep/osweep.toml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Config file not found at '/etc/osweep/osweep.toml'"
        );
    }

    #[test]
    fn test_config_parse_error_display() {
        let error = ConfigError::ConfigParseError {
            message: "invalid TOML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse config file: invalid TOML syntax"
        );
    }

    #[test]
    fn test_io_error_preserves_source() {
        use std::error::Error;
        let error = ConfigError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(error.source().is_some());
    }
}
