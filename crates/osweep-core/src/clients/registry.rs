//! Backend registry: maps a configured backend name to a client set.
//!
//! Real cloud backends (Nova/Glance/Keystone over HTTP) implement the
//! three port traits and register here; the in-tree `fixture` backend is
//! the one shipped today.

use std::sync::Arc;

use tracing::info;

use osweep_config::{CleanupGroup, ConfigError};

use crate::clients::fixture;
use crate::clients::traits::{CatalogClient, ComputeClient, ImageClient};
use crate::models::Credentials;

pub const FIXTURE_BACKEND: &str = "fixture";

/// The authenticated client set for one tenant, one entry per port.
#[derive(Clone)]
pub struct TenantClients {
    pub compute: Arc<dyn ComputeClient>,
    pub catalog: Arc<dyn CatalogClient>,
    pub image: Arc<dyn ImageClient>,
}

/// Comma-separated list of registered backend names, for error messages.
pub fn supported_backends_string() -> String {
    FIXTURE_BACKEND.to_string()
}

/// Build the client set for a cleanup group.
///
/// `credentials` is what a network-backed implementation authenticates
/// with; the fixture backend has no use for it.
pub fn build_backend(
    group: &CleanupGroup,
    credentials: &Credentials,
) -> Result<TenantClients, ConfigError> {
    match group.backend.as_str() {
        FIXTURE_BACKEND => {
            let path = group.fixture_path.as_deref().ok_or_else(|| {
                ConfigError::InvalidConfiguration {
                    message: format!(
                        "cleanup group for tenant '{}' uses the fixture backend but sets no fixture-path",
                        group.tenant
                    ),
                }
            })?;
            let cloud = Arc::new(fixture::load_fleet(path)?);
            info!(
                event = "clients.backend_built",
                backend = FIXTURE_BACKEND,
                tenant = %credentials.tenant
            );
            Ok(TenantClients {
                compute: cloud.clone(),
                catalog: cloud.clone(),
                image: cloud,
            })
        }
        other => Err(ConfigError::InvalidConfiguration {
            message: format!(
                "Unknown backend '{}'. Supported backends: {}",
                other,
                supported_backends_string()
            ),
        }),
    }
}

/// Credentials for a group: its auth URL and tenant, paired with the
/// first configured credential entry.
pub fn credentials_for_group(group: &CleanupGroup) -> Result<Credentials, ConfigError> {
    let entry = group
        .credentials
        .first()
        .ok_or_else(|| ConfigError::InvalidConfiguration {
            message: format!(
                "cleanup group for tenant '{}' has no credentials",
                group.tenant
            ),
        })?;
    Ok(Credentials {
        auth_url: group.auth_url.clone(),
        tenant: group.tenant.clone(),
        username: entry.username.clone(),
        password: entry.password.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use osweep_config::CredentialEntry;

    fn group(backend: &str, fixture_path: Option<std::path::PathBuf>) -> CleanupGroup {
        CleanupGroup {
            auth_url: "https://keystone.example.net:5000/v3".to_string(),
            tenant: "hgi-dev".to_string(),
            backend: backend.to_string(),
            fixture_path,
            credentials: vec![CredentialEntry {
                username: "svc-sweeper".to_string(),
                password: "hunter2".to_string(),
            }],
            instances: None,
            images: None,
            key_pairs: None,
        }
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let group = group("nova-http", None);
        let credentials = credentials_for_group(&group).unwrap();
        let error = build_backend(&group, &credentials).unwrap_err();
        assert!(error.to_string().contains("Unknown backend 'nova-http'"));
        assert!(error.to_string().contains("fixture"));
    }

    #[test]
    fn test_fixture_backend_requires_path() {
        let group = group("fixture", None);
        let credentials = credentials_for_group(&group).unwrap();
        let error = build_backend(&group, &credentials).unwrap_err();
        assert!(error.to_string().contains("fixture-path"));
    }

    #[test]
    fn test_fixture_backend_builds_from_fleet_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fleet.json");
        std::fs::write(&path, "{}").unwrap();

        let group = group("fixture", Some(path));
        let credentials = credentials_for_group(&group).unwrap();
        assert!(build_backend(&group, &credentials).is_ok());
    }

    #[test]
    fn test_credentials_for_group_uses_first_entry() {
        let mut group = group("fixture", None);
        group.credentials.push(CredentialEntry {
            username: "standby".to_string(),
            password: "other".to_string(),
        });

        let credentials = credentials_for_group(&group).unwrap();
        assert_eq!(credentials.username, "svc-sweeper");
        assert_eq!(credentials.tenant, "hgi-dev");
    }
}
