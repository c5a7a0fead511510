//! Cycle option and outcome types.

use std::time::Duration;

use serde::Serialize;

use crate::models::ResourceKind;

/// Caller-supplied knobs for one cycle.
#[derive(Debug, Clone)]
pub struct CycleOptions {
    pub tenant: String,
    /// Evaluate and report, but issue no deletes.
    pub dry_run: bool,
    /// Upper bound on concurrent delete calls within one resource kind.
    pub delete_concurrency: usize,
    /// Timeout applied to every backend call.
    pub request_timeout: Duration,
}

/// What happened to one resource during a cycle.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceOutcome {
    pub kind: ResourceKind,
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub action: OutcomeAction,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum OutcomeAction {
    Deleted,
    /// Dry-run stand-in for `Deleted`.
    WouldDelete,
    Kept { reasons: Vec<String> },
    Failed { error: String },
    Skipped { reason: String },
}

/// Results from a single cycle.
#[derive(Debug, Serialize)]
pub struct CycleSummary {
    pub cycle_id: String,
    pub tenant: String,
    pub dry_run: bool,
    pub duration_ms: u64,
    pub outcomes: Vec<ResourceOutcome>,
}

impl CycleSummary {
    pub fn deleted_count(&self) -> usize {
        self.count(|action| matches!(action, OutcomeAction::Deleted))
    }

    pub fn would_delete_count(&self) -> usize {
        self.count(|action| matches!(action, OutcomeAction::WouldDelete))
    }

    pub fn kept_count(&self) -> usize {
        self.count(|action| matches!(action, OutcomeAction::Kept { .. }))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|action| matches!(action, OutcomeAction::Failed { .. }))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|action| matches!(action, OutcomeAction::Skipped { .. }))
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }

    fn count(&self, predicate: impl Fn(&OutcomeAction) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| predicate(&outcome.action))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(action: OutcomeAction) -> ResourceOutcome {
        ResourceOutcome {
            kind: ResourceKind::Image,
            id: "img-1".to_string(),
            name: "base".to_string(),
            action,
        }
    }

    fn summary(outcomes: Vec<ResourceOutcome>) -> CycleSummary {
        CycleSummary {
            cycle_id: "test-cycle".to_string(),
            tenant: "hgi-dev".to_string(),
            dry_run: false,
            duration_ms: 0,
            outcomes,
        }
    }

    #[test]
    fn test_counts_partition_outcomes() {
        let cycle = summary(vec![
            outcome(OutcomeAction::Deleted),
            outcome(OutcomeAction::Kept {
                reasons: vec!["protected-image".to_string()],
            }),
            outcome(OutcomeAction::Failed {
                error: "409 conflict".to_string(),
            }),
            outcome(OutcomeAction::Deleted),
        ]);

        assert_eq!(cycle.deleted_count(), 2);
        assert_eq!(cycle.kept_count(), 1);
        assert_eq!(cycle.failed_count(), 1);
        assert_eq!(cycle.skipped_count(), 0);
        assert!(cycle.has_failures());
    }

    #[test]
    fn test_empty_cycle_has_no_failures() {
        let cycle = summary(vec![]);
        assert!(!cycle.has_failures());
        assert_eq!(cycle.deleted_count(), 0);
    }

    #[test]
    fn test_outcome_serializes_with_action_tag() {
        let rendered = serde_json::to_string(&outcome(OutcomeAction::Kept {
            reasons: vec!["image-in-use".to_string()],
        }))
        .unwrap();

        assert!(rendered.contains("\"action\":\"kept\""));
        assert!(rendered.contains("image-in-use"));
        assert!(rendered.contains("\"kind\":\"image\""));
    }
}
