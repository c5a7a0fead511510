//! Configuration types for the sweeper.
//!
//! Property names mirror the operator-facing schema: durations are
//! humantime strings ("2h", "30d"), areas are optional tables, and a
//! cleanup group maps to one tenant.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::errors::ConfigError;

const SUPPORTED_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Full configuration: general settings plus one or more cleanup groups.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SweepConfig {
    pub general: GeneralConfig,
    #[serde(default)]
    pub cleanup: Vec<CleanupGroup>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GeneralConfig {
    /// Interval between cycles in watch mode.
    #[serde(with = "humantime_serde")]
    pub run_every: Duration,

    /// Upper bound on concurrent delete calls within one resource kind.
    #[serde(default = "default_delete_concurrency")]
    pub delete_concurrency: usize,

    /// Timeout applied to every backend call.
    #[serde(with = "humantime_serde", default = "default_request_timeout")]
    pub request_timeout: Duration,

    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// One tenant to sweep: where it lives, how to authenticate, and which
/// resource areas are cleaned under which retention rules.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CleanupGroup {
    pub auth_url: String,
    pub tenant: String,

    /// Backend client set, resolved by name through the backend registry.
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Fleet file for the `fixture` backend.
    #[serde(default)]
    pub fixture_path: Option<PathBuf>,

    pub credentials: Vec<CredentialEntry>,

    #[serde(default)]
    pub instances: Option<AreaConfig>,
    #[serde(default)]
    pub images: Option<AreaConfig>,
    #[serde(default)]
    pub key_pairs: Option<AreaConfig>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CredentialEntry {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for CredentialEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialEntry")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Retention rules for one resource area (instances, images, key-pairs).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AreaConfig {
    /// Only resources created longer ago than this are eligible.
    #[serde(with = "humantime_serde", default)]
    pub remove_if_older_than: Option<Duration>,

    /// Resources whose name matches any of these patterns are kept.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Key-pairs only: keep a key-pair while any instance references it.
    #[serde(default)]
    pub remove_only_if_unused: bool,
}

fn default_delete_concurrency() -> usize {
    4
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_backend() -> String {
    "fixture".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl SweepConfig {
    /// Validate the parsed configuration before anything acts on it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.run_every.is_zero() {
            return Err(invalid("general.run-every must be greater than zero"));
        }
        if self.general.delete_concurrency == 0 {
            return Err(invalid("general.delete-concurrency must be at least 1"));
        }
        if self.general.request_timeout.is_zero() {
            return Err(invalid("general.request-timeout must be greater than zero"));
        }
        if !SUPPORTED_LOG_LEVELS.contains(&self.general.log.level.as_str()) {
            return Err(invalid(&format!(
                "unknown log level '{}'. Supported levels: {}",
                self.general.log.level,
                SUPPORTED_LOG_LEVELS.join(", ")
            )));
        }

        if self.cleanup.is_empty() {
            return Err(invalid("at least one [[cleanup]] group is required"));
        }

        for group in &self.cleanup {
            group.validate()?;
        }

        Ok(())
    }
}

impl CleanupGroup {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.auth_url.trim().is_empty() {
            return Err(invalid("cleanup.auth-url must not be empty"));
        }
        if self.tenant.trim().is_empty() {
            return Err(invalid("cleanup.tenant must not be empty"));
        }
        if self.credentials.is_empty() {
            return Err(invalid(&format!(
                "cleanup group for tenant '{}' has no credentials",
                self.tenant
            )));
        }
        for credential in &self.credentials {
            if credential.username.trim().is_empty() {
                return Err(invalid(&format!(
                    "cleanup group for tenant '{}' has a credential with an empty username",
                    self.tenant
                )));
            }
        }
        if self.instances.is_none() && self.images.is_none() && self.key_pairs.is_none() {
            return Err(invalid(&format!(
                "cleanup group for tenant '{}' enables no resource areas",
                self.tenant
            )));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::InvalidConfiguration {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_example() -> &'static str {
        r#"
            [general]
            run-every = "2h"

            [general.log]
            level = "debug"

            [[cleanup]]
            auth-url = "https://keystone.example.net:5000/v3"
            tenant = "hgi-dev"
            fixture-path = "fleet.json"

            [[cleanup.credentials]]
            username = "svc-sweeper"
            password = "hunter2"

            [cleanup.instances]
            remove-if-older-than = "72h"
            exclude = ["^jenkins-", "^prod-"]

            [cleanup.images]
            remove-if-older-than = "30d"

            [cleanup.key-pairs]
            remove-only-if-unused = true
        "#
    }

    #[test]
    fn test_parse_full_example() {
        let config: SweepConfig = toml::from_str(full_example()).unwrap();
        assert!(config.validate().is_ok());

        assert_eq!(config.general.run_every, Duration::from_secs(2 * 3600));
        assert_eq!(config.general.log.level, "debug");
        // Defaults fill in what the file omits
        assert_eq!(config.general.delete_concurrency, 4);
        assert_eq!(config.general.request_timeout, Duration::from_secs(30));

        let group = &config.cleanup[0];
        assert_eq!(group.tenant, "hgi-dev");
        assert_eq!(group.backend, "fixture");

        let instances = group.instances.as_ref().unwrap();
        assert_eq!(
            instances.remove_if_older_than,
            Some(Duration::from_secs(72 * 3600))
        );
        assert_eq!(instances.exclude, vec!["^jenkins-", "^prod-"]);
        assert!(!instances.remove_only_if_unused);

        let images = group.images.as_ref().unwrap();
        assert_eq!(
            images.remove_if_older_than,
            Some(Duration::from_secs(30 * 24 * 3600))
        );

        let key_pairs = group.key_pairs.as_ref().unwrap();
        assert!(key_pairs.remove_only_if_unused);
        assert_eq!(key_pairs.remove_if_older_than, None);
    }

    #[test]
    fn test_invalid_duration_string_is_a_parse_error() {
        let raw = r#"
            [general]
            run-every = "fortnightly"
        "#;
        let result = toml::from_str::<SweepConfig>(raw);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_property_is_rejected() {
        let raw = r#"
            [general]
            run-every = "1h"
            run-evry-typo = "1h"
        "#;
        assert!(toml::from_str::<SweepConfig>(raw).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_cleanup() {
        let raw = r#"
            [general]
            run-every = "1h"
        "#;
        let config: SweepConfig = toml::from_str(raw).unwrap();
        let error = config.validate().unwrap_err();
        assert!(matches!(error, ConfigError::InvalidConfiguration { .. }));
        assert!(error.to_string().contains("[[cleanup]]"));
    }

    #[test]
    fn test_validate_rejects_group_without_credentials() {
        let raw = r#"
            [general]
            run-every = "1h"

            [[cleanup]]
            auth-url = "https://keystone.example.net:5000/v3"
            tenant = "hgi-dev"
            credentials = []

            [cleanup.instances]
        "#;
        let config: SweepConfig = toml::from_str(raw).unwrap();
        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("no credentials"));
    }

    #[test]
    fn test_validate_rejects_group_without_areas() {
        let raw = r#"
            [general]
            run-every = "1h"

            [[cleanup]]
            auth-url = "https://keystone.example.net:5000/v3"
            tenant = "hgi-dev"

            [[cleanup.credentials]]
            username = "svc-sweeper"
            password = "hunter2"
        "#;
        let config: SweepConfig = toml::from_str(raw).unwrap();
        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("no resource areas"));
    }

    #[test]
    fn test_validate_rejects_unknown_log_level() {
        let mut config: SweepConfig = toml::from_str(full_example()).unwrap();
        config.general.log.level = "loud".to_string();
        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("unknown log level"));
    }

    #[test]
    fn test_validate_rejects_zero_delete_concurrency() {
        let mut config: SweepConfig = toml::from_str(full_example()).unwrap();
        config.general.delete_concurrency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_credential_debug_redacts_password() {
        let credential = CredentialEntry {
            username: "svc-sweeper".to_string(),
            password: "hunter2".to_string(),
        };
        let rendered = format!("{:?}", credential);
        assert!(rendered.contains("svc-sweeper"));
        assert!(!rendered.contains("hunter2"));
    }
}
