//! Key-pair manager.
//!
//! Key-pairs are the simplest kind: identified by name, no timestamps,
//! no retry policy. A deletion failure is always fatal for that key-pair.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::clients::{ClientError, ComputeClient, RawKeypair};
use crate::managers::errors::ManagerError;
use crate::managers::require_identifier;
use crate::managers::traits::ResourceManager;
use crate::models::{Keypair, ResourceKind};

pub struct KeypairManager {
    compute: Arc<dyn ComputeClient>,
}

impl KeypairManager {
    pub fn new(compute: Arc<dyn ComputeClient>) -> Self {
        Self { compute }
    }

    fn convert(raw: RawKeypair) -> Result<Keypair, ManagerError> {
        require_identifier(ResourceKind::Keypair, &raw.name)?;

        Ok(Keypair {
            id: raw.name.clone(),
            name: raw.name,
            fingerprint: raw.fingerprint,
        })
    }
}

#[async_trait]
impl ResourceManager for KeypairManager {
    type Item = Keypair;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Keypair
    }

    async fn get_by_id(&self, id: &str) -> Result<Keypair, ManagerError> {
        let raw = self.compute.get_keypair(id).await.map_err(|e| match e {
            ClientError::NotFound { identifier } => ManagerError::NotFound {
                kind: ResourceKind::Keypair,
                identifier,
            },
            source => ManagerError::Backend {
                kind: ResourceKind::Keypair,
                source,
            },
        })?;
        Self::convert(raw)
    }

    async fn get_all(&self) -> Result<HashSet<Keypair>, ManagerError> {
        let raws = self
            .compute
            .list_keypairs()
            .await
            .map_err(|source| ManagerError::Backend {
                kind: ResourceKind::Keypair,
                source,
            })?;

        let mut keypairs = HashSet::new();
        for raw in raws {
            match Self::convert(raw) {
                Ok(keypair) => {
                    keypairs.insert(keypair);
                }
                Err(e) => {
                    warn!(event = "core.keypair.record_skipped", error = %e);
                }
            }
        }
        Ok(keypairs)
    }

    async fn delete(&self, id: &str) -> Result<(), ManagerError> {
        match self.compute.delete_keypair(id).await {
            Ok(()) => {
                debug!(event = "core.keypair.deleted", name = id);
                Ok(())
            }
            Err(ClientError::NotFound { .. }) => {
                debug!(event = "core.keypair.already_gone", name = id);
                Ok(())
            }
            Err(source) => Err(ManagerError::Deletion {
                kind: ResourceKind::Keypair,
                identifier: id.to_string(),
                source,
            }),
        }
    }
}
