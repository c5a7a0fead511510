//! Backend client port traits.
//!
//! The core depends only on these operation shapes existing, never on a
//! transport. A backend implementation supplies all three; the in-memory
//! `MemoryCloud` is the one shipped in-tree.

use async_trait::async_trait;

use crate::clients::errors::ClientError;
use crate::clients::types::{Endpoint, RawImage, RawKeypair, RawServer};

/// Compute API surface: instances and the key-pairs registered with them.
#[async_trait]
pub trait ComputeClient: Send + Sync {
    async fn list_servers(&self) -> Result<Vec<RawServer>, ClientError>;

    async fn get_server(&self, id: &str) -> Result<RawServer, ClientError>;

    /// Forcibly delete an instance regardless of its power state.
    async fn force_delete_server(&self, id: &str) -> Result<(), ClientError>;

    /// Reset an instance's state so a stuck instance becomes deletable.
    async fn reset_server_state(&self, id: &str) -> Result<(), ClientError>;

    async fn list_keypairs(&self) -> Result<Vec<RawKeypair>, ClientError>;

    async fn get_keypair(&self, name: &str) -> Result<RawKeypair, ClientError>;

    async fn delete_keypair(&self, name: &str) -> Result<(), ClientError>;
}

/// Service catalog lookup, used once per image-manager construction.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn resolve_endpoint(&self, service_type: &str) -> Result<Endpoint, ClientError>;
}

/// Image API surface. Every call takes the endpoint the catalog resolved.
#[async_trait]
pub trait ImageClient: Send + Sync {
    async fn list_images(&self, endpoint: &Endpoint) -> Result<Vec<RawImage>, ClientError>;

    async fn get_image(&self, endpoint: &Endpoint, id: &str) -> Result<RawImage, ClientError>;

    async fn delete_image(&self, endpoint: &Endpoint, id: &str) -> Result<(), ClientError>;
}
