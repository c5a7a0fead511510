//! Prevent-delete detectors.
//!
//! A detector is a pure predicate over (candidate, evaluation context):
//! `true` means deletion is forbidden right now. Detectors never call a
//! backend; everything they read arrives through [`EvalContext`], so the
//! same inputs always give the same verdict.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use regex::Regex;

use crate::models::{Candidate, Instance};

/// Inputs detector evaluation is allowed to see: the evaluation instant
/// and the cycle's instance snapshot (taken once per cycle, before any
/// deletion, and shared by every in-use check that cycle).
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    pub now: DateTime<Utc>,
    pub instances: &'a HashSet<Instance>,
}

/// One resolved prevent-delete rule.
#[derive(Debug, Clone)]
pub enum Detector {
    /// Keep anything whose name matches one of the configured patterns.
    NameExcluded { patterns: Vec<Regex> },

    /// Keep anything created more recently than the minimum age. A
    /// resource exactly at the threshold is eligible. Keyed off creation
    /// time, not last update. Resources with no creation timestamp are
    /// kept: an unknown age can never satisfy an age requirement.
    AgeBelowThreshold { minimum_age: Duration },

    /// Keep images whose backend `protected` flag is set.
    ProtectedImage,

    /// Keep images referenced by any instance in the snapshot.
    ImageInUse,

    /// Keep key-pairs referenced by any instance in the snapshot.
    KeypairInUse,
}

impl Detector {
    pub fn name(&self) -> &'static str {
        match self {
            Detector::NameExcluded { .. } => "name-excluded",
            Detector::AgeBelowThreshold { .. } => "age-below-threshold",
            Detector::ProtectedImage => "protected-image",
            Detector::ImageInUse => "image-in-use",
            Detector::KeypairInUse => "key-pair-in-use",
        }
    }

    /// Whether this detector forbids deleting `candidate` right now.
    pub fn vetoes(&self, candidate: Candidate<'_>, ctx: &EvalContext<'_>) -> bool {
        match self {
            Detector::NameExcluded { patterns } => patterns
                .iter()
                .any(|pattern| pattern.is_match(candidate.name())),

            Detector::AgeBelowThreshold { minimum_age } => match candidate.created_at() {
                Some(created_at) => created_at > ctx.now - *minimum_age,
                None => true,
            },

            Detector::ProtectedImage => {
                matches!(candidate, Candidate::Image(image) if image.protected)
            }

            Detector::ImageInUse => match candidate {
                Candidate::Image(image) => ctx
                    .instances
                    .iter()
                    .any(|instance| instance.image_id == image.id),
                _ => false,
            },

            Detector::KeypairInUse => match candidate {
                Candidate::Keypair(keypair) => ctx.instances.iter().any(|instance| {
                    instance.key_name.as_deref() == Some(keypair.name.as_str())
                }),
                _ => false,
            },
        }
    }
}
