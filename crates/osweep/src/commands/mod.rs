mod check;
mod helpers;
mod json_types;
mod run;
mod watch;

use clap::ArgMatches;

use osweep_config::SweepConfig;

pub async fn run_command(
    matches: &ArgMatches,
    config: &SweepConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match matches.subcommand() {
        Some(("run", sub_matches)) => run::handle_run_command(sub_matches, config).await,
        Some(("watch", _)) => watch::handle_watch_command(config).await,
        Some(("check", _)) => check::handle_check_command(config),
        _ => unreachable!("clap enforces a known subcommand"),
    }
}
