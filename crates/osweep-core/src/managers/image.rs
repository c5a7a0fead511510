//! Disk image manager.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::clients::{CatalogClient, ClientError, Endpoint, ImageClient, RawImage};
use crate::managers::errors::ManagerError;
use crate::managers::traits::ResourceManager;
use crate::managers::{parse_timestamp, require_identifier};
use crate::models::{Image, ResourceKind};

const IMAGE_SERVICE_TYPE: &str = "image";

pub struct ImageManager {
    image: Arc<dyn ImageClient>,
    endpoint: Endpoint,
}

impl ImageManager {
    /// Construct the manager, resolving the image-service endpoint from
    /// the catalog once. Every subsequent call reuses the resolved
    /// endpoint; resolution failure is a connectivity failure for the
    /// whole cycle.
    pub async fn connect(
        catalog: Arc<dyn CatalogClient>,
        image: Arc<dyn ImageClient>,
    ) -> Result<Self, ManagerError> {
        let endpoint = catalog
            .resolve_endpoint(IMAGE_SERVICE_TYPE)
            .await
            .map_err(|source| ManagerError::EndpointResolution {
                service: IMAGE_SERVICE_TYPE.to_string(),
                source,
            })?;
        debug!(event = "core.image.endpoint_resolved", endpoint = %endpoint);
        Ok(Self { image, endpoint })
    }

    fn convert(raw: RawImage) -> Result<Image, ManagerError> {
        require_identifier(ResourceKind::Image, &raw.id)?;

        Ok(Image {
            created_at: parse_timestamp(ResourceKind::Image, "created_at", &raw.created_at)?,
            updated_at: parse_timestamp(ResourceKind::Image, "updated_at", &raw.updated_at)?,
            id: raw.id,
            name: raw.name,
            protected: raw.protected,
        })
    }
}

#[async_trait]
impl ResourceManager for ImageManager {
    type Item = Image;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Image
    }

    async fn get_by_id(&self, id: &str) -> Result<Image, ManagerError> {
        let raw = self
            .image
            .get_image(&self.endpoint, id)
            .await
            .map_err(|e| match e {
                ClientError::NotFound { identifier } => ManagerError::NotFound {
                    kind: ResourceKind::Image,
                    identifier,
                },
                source => ManagerError::Backend {
                    kind: ResourceKind::Image,
                    source,
                },
            })?;
        Self::convert(raw)
    }

    async fn get_all(&self) -> Result<HashSet<Image>, ManagerError> {
        let raws = self
            .image
            .list_images(&self.endpoint)
            .await
            .map_err(|source| ManagerError::Backend {
                kind: ResourceKind::Image,
                source,
            })?;

        let mut images = HashSet::new();
        for raw in raws {
            match Self::convert(raw) {
                Ok(image) => {
                    images.insert(image);
                }
                Err(e) => {
                    warn!(event = "core.image.record_skipped", error = %e);
                }
            }
        }
        Ok(images)
    }

    async fn delete(&self, id: &str) -> Result<(), ManagerError> {
        match self.image.delete_image(&self.endpoint, id).await {
            Ok(()) => {
                debug!(event = "core.image.deleted", id = id);
                Ok(())
            }
            Err(ClientError::NotFound { .. }) => {
                debug!(event = "core.image.already_gone", id = id);
                Ok(())
            }
            Err(source) => Err(ManagerError::Deletion {
                kind: ResourceKind::Image,
                identifier: id.to_string(),
                source,
            }),
        }
    }
}
