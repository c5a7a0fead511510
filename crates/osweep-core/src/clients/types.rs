//! Raw backend record shapes.
//!
//! These mirror what the backend APIs return, before conversion into the
//! domain models: timestamps are still text, optional attributes are
//! plain `Option`s, and field names follow the wire payloads.

use std::fmt;

use serde::Deserialize;

/// A resolved service endpoint from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint(pub String);

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw compute instance record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawServer {
    pub id: String,
    pub name: String,
    pub created: String,
    pub updated: String,
    #[serde(default)]
    pub image: Option<RawImageRef>,
    #[serde(default)]
    pub key_name: Option<String>,
}

/// The image reference embedded in a server record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawImageRef {
    pub id: String,
}

/// Raw image record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawImage {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub protected: bool,
}

/// Raw key-pair record. Key-pairs are identified by name and carry no
/// timestamps.
#[derive(Debug, Clone, Deserialize)]
pub struct RawKeypair {
    pub name: String,
    pub fingerprint: String,
}
