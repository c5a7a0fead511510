//! Domain models for the resources a tenant sweep manages.
//!
//! Entities are point-in-time snapshots: constructed once from a raw
//! backend record, never mutated, discarded after the cycle that fetched
//! them. Equality and hashing are keyed on the identifier alone so a
//! snapshot is a set with no duplicate identifiers.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// The resource categories a sweep can manage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Instance,
    Image,
    #[serde(rename = "key-pair")]
    Keypair,
}

impl ResourceKind {
    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Instance => "instance",
            ResourceKind::Image => "image",
            ResourceKind::Keypair => "key-pair",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Credentials for one tenant. Opaque to the core; handed to whichever
/// backend client set the registry builds.
#[derive(Clone)]
pub struct Credentials {
    pub auth_url: String,
    pub tenant: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("auth_url", &self.auth_url)
            .field("tenant", &self.tenant)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A compute instance.
///
/// `image_id` and `key_name` are weak references: identifier strings into
/// other kinds' namespaces, which may dangle once the referent is deleted.
#[derive(Debug, Clone)]
pub struct Instance {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub image_id: String,
    pub key_name: Option<String>,
}

/// A disk image. `protected` is the backend's own flag, independent of
/// any policy this system applies.
#[derive(Debug, Clone)]
pub struct Image {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub protected: bool,
}

/// An SSH key-pair. The backend identifies key-pairs by name and records
/// no timestamps for them.
#[derive(Debug, Clone)]
pub struct Keypair {
    pub id: String,
    pub name: String,
    pub fingerprint: String,
}

macro_rules! identity_eq {
    ($type:ty) => {
        impl PartialEq for $type {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id
            }
        }

        impl Eq for $type {}

        impl Hash for $type {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.id.hash(state);
            }
        }
    };
}

identity_eq!(Instance);
identity_eq!(Image);
identity_eq!(Keypair);

/// Common surface over the managed entity types.
pub trait Resource: Clone + Eq + Hash + Send + Sync + 'static {
    fn kind(&self) -> ResourceKind;
    fn id(&self) -> &str;
    fn name(&self) -> &str;

    /// Creation timestamp, where the backend records one.
    fn created_at(&self) -> Option<DateTime<Utc>>;

    /// Borrowed view for detector evaluation.
    fn as_candidate(&self) -> Candidate<'_>;
}

impl Resource for Instance {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Instance
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }

    fn as_candidate(&self) -> Candidate<'_> {
        Candidate::Instance(self)
    }
}

impl Resource for Image {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Image
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }

    fn as_candidate(&self) -> Candidate<'_> {
        Candidate::Image(self)
    }
}

impl Resource for Keypair {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Keypair
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn as_candidate(&self) -> Candidate<'_> {
        Candidate::Keypair(self)
    }
}

/// Kind-tagged borrowed view of an entity, consumed by detectors that
/// need kind-specific fields.
#[derive(Debug, Clone, Copy)]
pub enum Candidate<'a> {
    Instance(&'a Instance),
    Image(&'a Image),
    Keypair(&'a Keypair),
}

impl Candidate<'_> {
    pub fn name(&self) -> &str {
        match self {
            Candidate::Instance(instance) => &instance.name,
            Candidate::Image(image) => &image.name,
            Candidate::Keypair(keypair) => &keypair.name,
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Candidate::Instance(instance) => Some(instance.created_at),
            Candidate::Image(image) => Some(image.created_at),
            Candidate::Keypair(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn image(id: &str, name: &str) -> Image {
        Image {
            id: id.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            protected: false,
        }
    }

    #[test]
    fn test_equality_is_keyed_on_identifier_alone() {
        let a = image("img-1", "build-artifact");
        let b = image("img-1", "renamed-since-fetch");
        let c = image("img-2", "build-artifact");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_snapshot_set_deduplicates_by_identifier() {
        let mut snapshot = HashSet::new();
        snapshot.insert(image("img-1", "first"));
        snapshot.insert(image("img-1", "second"));
        snapshot.insert(image("img-2", "third"));

        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn test_keypair_has_no_creation_timestamp() {
        let keypair = Keypair {
            id: "deploy-key".to_string(),
            name: "deploy-key".to_string(),
            fingerprint: "aa:bb:cc".to_string(),
        };
        assert_eq!(keypair.created_at(), None);
        assert_eq!(keypair.kind(), ResourceKind::Keypair);
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials {
            auth_url: "https://keystone.example.net:5000/v3".to_string(),
            tenant: "hgi-dev".to_string(),
            username: "svc-sweeper".to_string(),
            password: "hunter2".to_string(),
        };
        let rendered = format!("{:?}", credentials);
        assert!(rendered.contains("svc-sweeper"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_resource_kind_names() {
        assert_eq!(ResourceKind::Instance.name(), "instance");
        assert_eq!(ResourceKind::Image.name(), "image");
        assert_eq!(ResourceKind::Keypair.name(), "key-pair");
        assert_eq!(ResourceKind::Keypair.to_string(), "key-pair");
    }
}
