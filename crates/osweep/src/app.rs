use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("osweep")
        .about("Retention sweeper for OpenStack tenant resources")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Path to the config file")
                .global(true)
                .default_value("osweep.toml"),
        )
        .subcommand(
            Command::new("run")
                .about("Run one cleanup cycle across all configured tenants")
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help("Evaluate the policy but delete nothing")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the cycle report as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("watch")
                .about("Run cleanup cycles on the configured schedule until interrupted"),
        )
        .subcommand(
            Command::new("check")
                .about("Validate the config, resolve every policy, and print the plan"),
        )
}
