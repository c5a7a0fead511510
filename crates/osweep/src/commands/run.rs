use clap::ArgMatches;
use tokio_util::sync::CancellationToken;
use tracing::info;

use osweep_config::SweepConfig;

use super::helpers;
use super::json_types::RunReport;

pub(crate) async fn handle_run_command(
    sub_matches: &ArgMatches,
    config: &SweepConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let dry_run = sub_matches.get_flag("dry-run");
    let as_json = sub_matches.get_flag("json");

    info!(
        event = "cli.run_started",
        dry_run = dry_run,
        groups = config.cleanup.len()
    );

    let cancel = CancellationToken::new();
    let summaries = helpers::run_all_groups(config, dry_run, &cancel).await?;

    if as_json {
        let report = RunReport { cycles: &summaries };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for summary in &summaries {
            helpers::print_summary(summary);
        }
    }

    info!(
        event = "cli.run_completed",
        cycles = summaries.len(),
        cycles_with_failures = summaries.iter().filter(|s| s.has_failures()).count()
    );

    Ok(())
}
