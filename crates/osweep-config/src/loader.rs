//! Config file loading.

use std::path::Path;

use tracing::debug;

use crate::errors::ConfigError;
use crate::types::SweepConfig;

/// Load and validate a config file.
///
/// The returned configuration has passed structural validation; policy
/// resolution (regex compilation, detector construction) happens later in
/// the core and has its own failure mode.
pub fn load_config(path: &Path) -> Result<SweepConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::ConfigNotFound {
            path: path.display().to_string(),
        });
    }

    let raw = std::fs::read_to_string(path)?;
    let config: SweepConfig =
        toml::from_str(&raw).map_err(|e| ConfigError::ConfigParseError {
            message: e.to_string(),
        })?;
    config.validate()?;

    debug!(
        event = "config.loaded",
        path = %path.display(),
        cleanup_groups = config.cleanup.len()
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");

        let error = load_config(&path).unwrap_err();
        assert!(matches!(error, ConfigError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_load_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("osweep.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"
                [general]
                run-every = "30m"

                [[cleanup]]
                auth-url = "https://keystone.example.net:5000/v3"
                tenant = "hgi-dev"
                fixture-path = "fleet.json"

                [[cleanup.credentials]]
                username = "svc-sweeper"
                password = "hunter2"

                [cleanup.images]
                remove-if-older-than = "14d"
            "#
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.cleanup.len(), 1);
        assert_eq!(
            config.general.run_every,
            std::time::Duration::from_secs(30 * 60)
        );
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("osweep.toml");
        std::fs::write(&path, "general = not toml").unwrap();

        let error = load_config(&path).unwrap_err();
        assert!(matches!(error, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_load_config_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("osweep.toml");
        std::fs::write(&path, "[general]\nrun-every = \"1h\"\n").unwrap();

        let error = load_config(&path).unwrap_err();
        assert!(matches!(error, ConfigError::InvalidConfiguration { .. }));
    }
}
