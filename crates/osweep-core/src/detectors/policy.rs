//! Policy resolution: declarative area configuration into detector lists.
//!
//! Resolution happens once, at configuration-application time, and fails
//! fast: no backend is contacted until every area's detectors compiled.

use chrono::Duration;
use regex::Regex;
use tracing::debug;

use osweep_config::{AreaConfig, CleanupGroup};

use crate::detectors::errors::PolicyError;
use crate::detectors::types::Detector;
use crate::models::ResourceKind;

/// The resolved prevent-delete policy for one cleanup group. `None`
/// means the area is not cleaned at all.
#[derive(Debug, Clone, Default)]
pub struct CleanupPolicy {
    pub instances: Option<Vec<Detector>>,
    pub images: Option<Vec<Detector>>,
    pub key_pairs: Option<Vec<Detector>>,
}

impl CleanupPolicy {
    /// Whether this cycle needs the instance snapshot: either instances
    /// are being cleaned, or some enabled detector does in-use checks
    /// against them.
    pub fn requires_instance_snapshot(&self) -> bool {
        self.instances.is_some()
            || self.images.as_deref().is_some_and(uses_instance_snapshot)
            || self
                .key_pairs
                .as_deref()
                .is_some_and(uses_instance_snapshot)
    }
}

fn uses_instance_snapshot(detectors: &[Detector]) -> bool {
    detectors
        .iter()
        .any(|d| matches!(d, Detector::ImageInUse | Detector::KeypairInUse))
}

/// Resolve a cleanup group's areas into a [`CleanupPolicy`].
pub fn resolve_policy(group: &CleanupGroup) -> Result<CleanupPolicy, PolicyError> {
    let policy = CleanupPolicy {
        instances: group
            .instances
            .as_ref()
            .map(|area| resolve_area(ResourceKind::Instance, area))
            .transpose()?,
        images: group
            .images
            .as_ref()
            .map(|area| resolve_area(ResourceKind::Image, area))
            .transpose()?,
        key_pairs: group
            .key_pairs
            .as_ref()
            .map(|area| resolve_area(ResourceKind::Keypair, area))
            .transpose()?,
    };
    Ok(policy)
}

fn resolve_area(kind: ResourceKind, area: &AreaConfig) -> Result<Vec<Detector>, PolicyError> {
    let mut detectors = Vec::new();

    if !area.exclude.is_empty() {
        let patterns = area
            .exclude
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| PolicyError::InvalidExcludePattern {
                    kind,
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        detectors.push(Detector::NameExcluded { patterns });
    }

    if let Some(minimum_age) = area.remove_if_older_than {
        if minimum_age.is_zero() {
            return Err(PolicyError::ZeroMinimumAge { kind });
        }
        let minimum_age =
            Duration::from_std(minimum_age).map_err(|e| PolicyError::MinimumAgeOutOfRange {
                kind,
                message: e.to_string(),
            })?;
        detectors.push(Detector::AgeBelowThreshold { minimum_age });
    }

    if area.remove_only_if_unused && kind != ResourceKind::Keypair {
        return Err(PolicyError::UnsupportedOption {
            kind,
            option: "remove-only-if-unused",
        });
    }

    // Non-negotiable per-kind rules come last: protection and in-use
    // always apply to images, whatever the operator configured.
    match kind {
        ResourceKind::Image => {
            detectors.push(Detector::ProtectedImage);
            detectors.push(Detector::ImageInUse);
        }
        ResourceKind::Keypair if area.remove_only_if_unused => {
            detectors.push(Detector::KeypairInUse);
        }
        _ => {}
    }

    debug!(
        event = "core.policy.area_resolved",
        kind = %kind,
        detectors = detectors.len()
    );

    Ok(detectors)
}
