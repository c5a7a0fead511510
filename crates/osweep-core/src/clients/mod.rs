pub mod errors;
pub mod fixture;
pub mod memory;
pub mod registry;
pub mod traits;
pub mod types;

// Public API exports
pub use errors::ClientError;
pub use fixture::load_fleet;
pub use memory::MemoryCloud;
pub use registry::{
    TenantClients, build_backend, credentials_for_group, supported_backends_string,
};
pub use traits::{CatalogClient, ComputeClient, ImageClient};
pub use types::{Endpoint, RawImage, RawImageRef, RawKeypair, RawServer};
