//! Fleet fixture loading for the `fixture` backend.
//!
//! A fleet file is a JSON snapshot of a tenant: raw server, image, and
//! key-pair records exactly as a backend would return them. Operators use
//! it to rehearse a retention policy (usually with `--dry-run`) without
//! touching a real cloud.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use osweep_config::ConfigError;

use crate::clients::memory::MemoryCloud;
use crate::clients::types::{RawImage, RawKeypair, RawServer};

#[derive(Debug, Deserialize)]
struct FleetFixture {
    #[serde(default)]
    servers: Vec<RawServer>,
    #[serde(default)]
    images: Vec<RawImage>,
    #[serde(default)]
    keypairs: Vec<RawKeypair>,
}

/// Load a fleet file into an in-memory backend.
pub fn load_fleet(path: &Path) -> Result<MemoryCloud, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::ConfigNotFound {
            path: path.display().to_string(),
        });
    }

    let raw = std::fs::read_to_string(path)?;
    let fixture: FleetFixture =
        serde_json::from_str(&raw).map_err(|e| ConfigError::ConfigParseError {
            message: format!("invalid fleet fixture: {e}"),
        })?;

    debug!(
        event = "clients.fixture.loaded",
        path = %path.display(),
        servers = fixture.servers.len(),
        images = fixture.images.len(),
        keypairs = fixture.keypairs.len()
    );

    Ok(MemoryCloud::with_fleet(
        fixture.servers,
        fixture.images,
        fixture.keypairs,
    ))
}
