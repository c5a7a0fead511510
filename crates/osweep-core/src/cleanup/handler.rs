//! The cleanup cycle: fetch → evaluate → delete → report.

use std::collections::HashSet;
use std::time::Instant;

use chrono::Utc;
use futures::{StreamExt, stream};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cleanup::errors::CycleError;
use crate::cleanup::types::{CycleOptions, CycleSummary, OutcomeAction, ResourceOutcome};
use crate::clients::{ClientError, TenantClients};
use crate::detectors::{CleanupPolicy, Detector, EvalContext};
use crate::managers::{
    ImageManager, InstanceManager, KeypairManager, ManagerError, ResourceManager,
};
use crate::models::{Instance, Resource, ResourceKind};

/// Run one cleanup cycle against a tenant.
///
/// The instance snapshot is captured once, up front, and feeds every
/// in-use check in the cycle: an instance deleted later in the same
/// cycle still counts as using its image and key-pair until the next
/// cycle re-fetches. Areas are processed in a fixed order (instances,
/// images, key-pairs); per-resource failures are recorded, not raised.
pub async fn run_cycle(
    clients: &TenantClients,
    policy: &CleanupPolicy,
    options: &CycleOptions,
    cancel: &CancellationToken,
) -> Result<CycleSummary, CycleError> {
    let started = Instant::now();
    let cycle_id = Uuid::new_v4().to_string();
    info!(
        event = "core.cycle.started",
        cycle_id = %cycle_id,
        tenant = %options.tenant,
        dry_run = options.dry_run
    );

    let instance_manager = InstanceManager::new(clients.compute.clone());
    let instances = if policy.requires_instance_snapshot() {
        fetch_snapshot(&instance_manager, options).await?
    } else {
        HashSet::new()
    };

    let mut outcomes = Vec::new();

    if let Some(detectors) = policy.instances.as_deref() {
        let snapshot = instances.clone();
        sweep_area(
            &instance_manager,
            detectors,
            &instances,
            snapshot,
            options,
            cancel,
            &mut outcomes,
        )
        .await;
    }

    if let Some(detectors) = policy.images.as_deref() {
        let connect = ImageManager::connect(clients.catalog.clone(), clients.image.clone());
        let manager = match timeout(options.request_timeout, connect).await {
            Ok(Ok(manager)) => manager,
            Ok(Err(source)) => {
                return Err(CycleError::Manager {
                    kind: ResourceKind::Image,
                    source,
                });
            }
            Err(_) => {
                return Err(CycleError::Manager {
                    kind: ResourceKind::Image,
                    source: ManagerError::EndpointResolution {
                        service: "image".to_string(),
                        source: ClientError::Timeout {
                            seconds: options.request_timeout.as_secs(),
                        },
                    },
                });
            }
        };
        let snapshot = fetch_snapshot(&manager, options).await?;
        sweep_area(
            &manager,
            detectors,
            &instances,
            snapshot,
            options,
            cancel,
            &mut outcomes,
        )
        .await;
    }

    if let Some(detectors) = policy.key_pairs.as_deref() {
        let manager = KeypairManager::new(clients.compute.clone());
        let snapshot = fetch_snapshot(&manager, options).await?;
        sweep_area(
            &manager,
            detectors,
            &instances,
            snapshot,
            options,
            cancel,
            &mut outcomes,
        )
        .await;
    }

    let summary = CycleSummary {
        cycle_id,
        tenant: options.tenant.clone(),
        dry_run: options.dry_run,
        duration_ms: started.elapsed().as_millis() as u64,
        outcomes,
    };
    info!(
        event = "core.cycle.completed",
        cycle_id = %summary.cycle_id,
        deleted = summary.deleted_count(),
        kept = summary.kept_count(),
        failed = summary.failed_count(),
        skipped = summary.skipped_count(),
        duration_ms = summary.duration_ms
    );
    Ok(summary)
}

/// Fetch one kind's snapshot, timeout-wrapped. Failure here is fatal to
/// the cycle: a policy evaluated against a partial fleet is unsafe.
async fn fetch_snapshot<M: ResourceManager>(
    manager: &M,
    options: &CycleOptions,
) -> Result<HashSet<M::Item>, CycleError> {
    let kind = manager.kind();
    match timeout(options.request_timeout, manager.get_all()).await {
        Ok(Ok(snapshot)) => {
            debug!(
                event = "core.cycle.snapshot_fetched",
                kind = %kind,
                count = snapshot.len()
            );
            Ok(snapshot)
        }
        Ok(Err(source)) => Err(CycleError::Snapshot { kind, source }),
        Err(_) => Err(CycleError::Snapshot {
            kind,
            source: ManagerError::Backend {
                kind,
                source: ClientError::Timeout {
                    seconds: options.request_timeout.as_secs(),
                },
            },
        }),
    }
}

/// Evaluate one area's detectors over its snapshot, then delete the
/// unvetoed subset with bounded concurrency.
async fn sweep_area<M: ResourceManager>(
    manager: &M,
    detectors: &[Detector],
    instances: &HashSet<Instance>,
    snapshot: HashSet<M::Item>,
    options: &CycleOptions,
    cancel: &CancellationToken,
    outcomes: &mut Vec<ResourceOutcome>,
) {
    let kind = manager.kind();
    let ctx = EvalContext {
        now: Utc::now(),
        instances,
    };

    let mut doomed: Vec<(String, String)> = Vec::new();
    for item in &snapshot {
        let reasons: Vec<String> = detectors
            .iter()
            .filter(|detector| detector.vetoes(item.as_candidate(), &ctx))
            .map(|detector| detector.name().to_string())
            .collect();

        if reasons.is_empty() {
            doomed.push((item.id().to_string(), item.name().to_string()));
        } else {
            debug!(
                event = "core.cycle.resource_kept",
                kind = %kind,
                id = item.id(),
                reasons = ?reasons
            );
            outcomes.push(ResourceOutcome {
                kind,
                id: item.id().to_string(),
                name: item.name().to_string(),
                action: OutcomeAction::Kept { reasons },
            });
        }
    }

    info!(
        event = "core.cycle.area_evaluated",
        kind = %kind,
        total = snapshot.len(),
        eligible = doomed.len()
    );

    let deletions: Vec<ResourceOutcome> = stream::iter(doomed)
        .map(|(id, name)| {
            let cancel = cancel.clone();
            async move {
                let action = delete_one(manager, &id, options, &cancel).await;
                ResourceOutcome {
                    kind,
                    id,
                    name,
                    action,
                }
            }
        })
        .buffer_unordered(options.delete_concurrency)
        .collect()
        .await;
    outcomes.extend(deletions);
}

/// Delete a single resource, honoring cancellation, dry-run, and the
/// per-call timeout. Always resolves to an outcome, never an error.
async fn delete_one<M: ResourceManager>(
    manager: &M,
    id: &str,
    options: &CycleOptions,
    cancel: &CancellationToken,
) -> OutcomeAction {
    let kind = manager.kind();

    if cancel.is_cancelled() {
        debug!(event = "core.cycle.delete_skipped", kind = %kind, id = id);
        return OutcomeAction::Skipped {
            reason: "cycle cancelled".to_string(),
        };
    }

    if options.dry_run {
        info!(event = "core.cycle.would_delete", kind = %kind, id = id);
        return OutcomeAction::WouldDelete;
    }

    match timeout(options.request_timeout, manager.delete(id)).await {
        Ok(Ok(())) => {
            info!(event = "core.cycle.resource_deleted", kind = %kind, id = id);
            OutcomeAction::Deleted
        }
        Ok(Err(e)) => {
            warn!(
                event = "core.cycle.delete_failed",
                kind = %kind,
                id = id,
                error = %e
            );
            OutcomeAction::Failed {
                error: e.to_string(),
            }
        }
        Err(_) => {
            let error = ClientError::Timeout {
                seconds: options.request_timeout.as_secs(),
            };
            warn!(event = "core.cycle.delete_timed_out", kind = %kind, id = id);
            OutcomeAction::Failed {
                error: error.to_string(),
            }
        }
    }
}
