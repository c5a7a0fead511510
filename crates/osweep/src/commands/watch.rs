use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use osweep_config::SweepConfig;

use super::helpers;

/// Run cycles on the configured interval until SIGINT/SIGTERM.
///
/// A failed cycle (connectivity, endpoint resolution) is logged and the
/// next tick tries again; only shutdown ends the loop. In-flight
/// deletions drain before exit.
pub(crate) async fn handle_watch_command(
    config: &SweepConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let token = CancellationToken::new();
    let signal_task = tokio::spawn(wait_for_shutdown_signal(token.clone()));

    info!(
        event = "cli.watch_started",
        run_every = %humantime::format_duration(config.general.run_every)
    );

    loop {
        match helpers::run_all_groups(config, false, &token).await {
            Ok(summaries) => {
                for summary in &summaries {
                    helpers::print_summary(summary);
                }
            }
            Err(e) => {
                error!(event = "cli.watch_cycle_failed", error = %e);
            }
        }

        tokio::select! {
            _ = token.cancelled() => break,
            _ = tokio::time::sleep(config.general.run_every) => {}
        }
    }

    info!(event = "cli.watch_stopped");
    let _ = signal_task.await;
    Ok(())
}

/// Wait for a shutdown signal (SIGTERM or SIGINT/Ctrl-C).
///
/// When the signal is received, cancels the provided token so the cycle
/// in progress finishes its in-flight deletions and starts no new ones.
async fn wait_for_shutdown_signal(token: CancellationToken) {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {
                        info!(event = "cli.watch_signal_received", signal = "SIGINT");
                    }
                    _ = sigterm.recv() => {
                        info!(event = "cli.watch_signal_received", signal = "SIGTERM");
                    }
                }
            }
            Err(e) => {
                error!(
                    event = "cli.watch_signal_handler_failed",
                    error = %e,
                    "SIGTERM handler failed, falling back to Ctrl-C only",
                );
                let _ = ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = ctrl_c.await;
        info!(event = "cli.watch_signal_received", signal = "SIGINT");
    }

    token.cancel();
}
