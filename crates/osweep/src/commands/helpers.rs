//! Shared cycle-driving helpers for the run and watch commands.

use tokio_util::sync::CancellationToken;
use tracing::info;

use osweep_config::SweepConfig;
use osweep_core::cleanup::{CycleOptions, CycleSummary, OutcomeAction};
use osweep_core::detectors::CleanupPolicy;
use osweep_core::{events, resolve_policy};

/// Run one cycle for every configured cleanup group.
///
/// Every group's policy is resolved before any backend is contacted, so
/// a bad policy in the last group stops the whole run up front instead
/// of after half the fleet was already swept.
pub(crate) async fn run_all_groups(
    config: &SweepConfig,
    dry_run: bool,
    cancel: &CancellationToken,
) -> Result<Vec<CycleSummary>, Box<dyn std::error::Error>> {
    let mut prepared: Vec<(&osweep_config::CleanupGroup, CleanupPolicy)> = Vec::new();
    for group in &config.cleanup {
        let policy = match resolve_policy(group) {
            Ok(policy) => policy,
            Err(e) => {
                events::log_app_error(&e);
                return Err(e.into());
            }
        };
        prepared.push((group, policy));
    }

    let mut summaries = Vec::new();
    for (group, policy) in prepared {
        if cancel.is_cancelled() {
            info!(event = "cli.group_skipped", tenant = %group.tenant);
            break;
        }

        let credentials = osweep_core::credentials_for_group(group)?;
        let clients = osweep_core::build_backend(group, &credentials)?;
        let options = CycleOptions {
            tenant: group.tenant.clone(),
            dry_run,
            delete_concurrency: config.general.delete_concurrency,
            request_timeout: config.general.request_timeout,
        };

        match osweep_core::run_cycle(&clients, &policy, &options, cancel).await {
            Ok(summary) => summaries.push(summary),
            Err(e) => {
                events::log_app_error(&e);
                return Err(e.into());
            }
        }
    }

    Ok(summaries)
}

pub(crate) fn print_summary(summary: &CycleSummary) {
    let heading = if summary.dry_run { "Dry-run cycle" } else { "Cycle" };
    println!("{} complete for tenant '{}'.", heading, summary.tenant);

    if summary.dry_run {
        println!("  Would delete: {}", summary.would_delete_count());
        for outcome in &summary.outcomes {
            if matches!(outcome.action, OutcomeAction::WouldDelete) {
                println!("    - {} '{}' ({})", outcome.kind, outcome.id, outcome.name);
            }
        }
    } else {
        println!("  Deleted: {}", summary.deleted_count());
        for outcome in &summary.outcomes {
            if matches!(outcome.action, OutcomeAction::Deleted) {
                println!("    - {} '{}' ({})", outcome.kind, outcome.id, outcome.name);
            }
        }
    }

    println!("  Kept: {}", summary.kept_count());

    if summary.failed_count() > 0 {
        eprintln!("  Failed: {}", summary.failed_count());
        for outcome in &summary.outcomes {
            if let OutcomeAction::Failed { error } = &outcome.action {
                eprintln!("    - {} '{}': {}", outcome.kind, outcome.id, error);
            }
        }
    }

    if summary.skipped_count() > 0 {
        println!("  Skipped (shutdown): {}", summary.skipped_count());
    }
}
