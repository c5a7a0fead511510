//! Compute instance manager.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::clients::{ClientError, ComputeClient, RawServer};
use crate::managers::errors::ManagerError;
use crate::managers::traits::ResourceManager;
use crate::managers::{parse_timestamp, require_identifier};
use crate::models::{Instance, ResourceKind};

/// Where a delete call is in its bounded retry: the reset arm is only
/// reachable from `First`, so the loop makes at most two delete attempts
/// and one state reset.
enum DeleteAttempt {
    First,
    AfterReset,
}

pub struct InstanceManager {
    compute: Arc<dyn ComputeClient>,
}

impl InstanceManager {
    pub fn new(compute: Arc<dyn ComputeClient>) -> Self {
        Self { compute }
    }

    fn convert(raw: RawServer) -> Result<Instance, ManagerError> {
        require_identifier(ResourceKind::Instance, &raw.id)?;

        let image_id = raw
            .image
            .map(|reference| reference.id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ManagerError::Conversion {
                kind: ResourceKind::Instance,
                message: format!("server '{}' has no image reference", raw.id),
            })?;

        Ok(Instance {
            created_at: parse_timestamp(ResourceKind::Instance, "created", &raw.created)?,
            updated_at: parse_timestamp(ResourceKind::Instance, "updated", &raw.updated)?,
            id: raw.id,
            name: raw.name,
            image_id,
            key_name: raw.key_name.filter(|key| !key.is_empty()),
        })
    }
}

#[async_trait]
impl ResourceManager for InstanceManager {
    type Item = Instance;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Instance
    }

    async fn get_by_id(&self, id: &str) -> Result<Instance, ManagerError> {
        let raw = self.compute.get_server(id).await.map_err(|e| match e {
            ClientError::NotFound { identifier } => ManagerError::NotFound {
                kind: ResourceKind::Instance,
                identifier,
            },
            source => ManagerError::Backend {
                kind: ResourceKind::Instance,
                source,
            },
        })?;
        Self::convert(raw)
    }

    async fn get_all(&self) -> Result<HashSet<Instance>, ManagerError> {
        let raws = self
            .compute
            .list_servers()
            .await
            .map_err(|source| ManagerError::Backend {
                kind: ResourceKind::Instance,
                source,
            })?;

        let mut instances = HashSet::new();
        for raw in raws {
            match Self::convert(raw) {
                Ok(instance) => {
                    instances.insert(instance);
                }
                Err(e) => {
                    warn!(event = "core.instance.record_skipped", error = %e);
                }
            }
        }
        Ok(instances)
    }

    async fn delete(&self, id: &str) -> Result<(), ManagerError> {
        let mut attempt = DeleteAttempt::First;
        loop {
            match self.compute.force_delete_server(id).await {
                Ok(()) => {
                    debug!(event = "core.instance.deleted", id = id);
                    return Ok(());
                }
                Err(ClientError::NotFound { .. }) => {
                    debug!(event = "core.instance.already_gone", id = id);
                    return Ok(());
                }
                Err(ClientError::InvalidState { message })
                    if matches!(attempt, DeleteAttempt::First) =>
                {
                    warn!(
                        event = "core.instance.state_reset",
                        id = id,
                        reason = %message
                    );
                    self.compute
                        .reset_server_state(id)
                        .await
                        .map_err(|source| ManagerError::Deletion {
                            kind: ResourceKind::Instance,
                            identifier: id.to_string(),
                            source,
                        })?;
                    attempt = DeleteAttempt::AfterReset;
                }
                Err(source) => {
                    return Err(ManagerError::Deletion {
                        kind: ResourceKind::Instance,
                        identifier: id.to_string(),
                        source,
                    });
                }
            }
        }
    }
}
