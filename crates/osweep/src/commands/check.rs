use tracing::info;

use osweep_config::{AreaConfig, SweepConfig};
use osweep_core::detectors::Detector;
use osweep_core::{events, resolve_policy};

/// Validate the configuration end to end: the file already parsed, so
/// what remains is policy resolution. Prints the plan each tenant would
/// run under, without touching any backend.
pub(crate) fn handle_check_command(
    config: &SweepConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.check_started", groups = config.cleanup.len());

    for group in &config.cleanup {
        let policy = match resolve_policy(group) {
            Ok(policy) => policy,
            Err(e) => {
                eprintln!("Policy for tenant '{}' is invalid: {}", group.tenant, e);
                events::log_app_error(&e);
                return Err(e.into());
            }
        };

        println!("Tenant '{}' (backend '{}'):", group.tenant, group.backend);
        print_area("instances", group.instances.as_ref(), policy.instances.as_deref());
        print_area("images", group.images.as_ref(), policy.images.as_deref());
        print_area("key-pairs", group.key_pairs.as_ref(), policy.key_pairs.as_deref());
    }

    println!("Config OK.");
    info!(event = "cli.check_completed");
    Ok(())
}

fn print_area(label: &str, area: Option<&AreaConfig>, detectors: Option<&[Detector]>) {
    let (Some(area), Some(detectors)) = (area, detectors) else {
        println!("  {label}: not cleaned");
        return;
    };

    println!("  {label}:");
    if let Some(minimum_age) = area.remove_if_older_than {
        println!(
            "    remove if older than {}",
            humantime::format_duration(minimum_age)
        );
    }
    if !area.exclude.is_empty() {
        println!("    exclude: {}", area.exclude.join(", "));
    }

    if detectors.is_empty() {
        println!("    detectors: (none; every resource is eligible)");
    } else {
        let names: Vec<_> = detectors.iter().map(Detector::name).collect();
        println!("    detectors: {}", names.join(", "));
    }
}
