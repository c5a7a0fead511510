use std::path::Path;

use osweep_core::init_logging;

mod app;
mod commands;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = app::build_cli().get_matches();

    let config_path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("osweep.toml");
    let config = match osweep_config::load_config(Path::new(config_path)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    // -v wins over the configured level; RUST_LOG overrides both
    let verbose = matches.get_flag("verbose");
    let default_filter = if verbose {
        "debug"
    } else {
        config.general.log.level.as_str()
    };
    init_logging(default_filter);

    commands::run_command(&matches, &config).await?;

    Ok(())
}
