pub mod errors;
pub mod image;
pub mod instance;
pub mod keypair;
pub mod traits;

// Public API exports
pub use errors::ManagerError;
pub use image::ImageManager;
pub use instance::InstanceManager;
pub use keypair::KeypairManager;
pub use traits::ResourceManager;

use chrono::{DateTime, Utc};

use crate::models::ResourceKind;

/// Parse a backend timestamp (RFC 3339 text) during raw-record conversion.
pub(crate) fn parse_timestamp(
    kind: ResourceKind,
    field: &str,
    value: &str,
) -> Result<DateTime<Utc>, ManagerError> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| ManagerError::Conversion {
            kind,
            message: format!("unparseable {field} timestamp '{value}': {e}"),
        })
}

/// Reject the identifiers no entity is allowed to carry.
pub(crate) fn require_identifier(kind: ResourceKind, id: &str) -> Result<(), ManagerError> {
    if id.is_empty() {
        return Err(ManagerError::Conversion {
            kind,
            message: "record has an empty identifier".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_accepts_rfc3339() {
        let parsed = parse_timestamp(ResourceKind::Image, "created_at", "2026-01-10T08:00:00Z")
            .unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-01-10T08:00:00+00:00");
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        let error =
            parse_timestamp(ResourceKind::Instance, "created", "last tuesday").unwrap_err();
        assert!(matches!(error, ManagerError::Conversion { .. }));
        assert!(error.to_string().contains("created"));
    }

    #[test]
    fn test_require_identifier_rejects_empty() {
        assert!(require_identifier(ResourceKind::Keypair, "").is_err());
        assert!(require_identifier(ResourceKind::Keypair, "deploy-key").is_ok());
    }
}
