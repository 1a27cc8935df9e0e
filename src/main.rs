use clap::Parser;
use std::process;

use projai::cli::commands::{Cli, Commands};
use projai::cli;
use projai::config::Config;
use projai::logging;

fn main() {
    let cli_args = Cli::parse();
    let json_output = cli_args.json;
    let project_flag = cli_args.project.clone();

    let config = Config::load();
    let _logger = match logging::init_logging(config.log_level.as_deref()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("warning: logging disabled: {e:#}");
            None
        }
    };

    let exit_code = match cli_args.command {
        Commands::Init => cli::init::run(json_output),
        Commands::Project(cmd) => cli::project::run(cmd, json_output),
        Commands::Task(cmd) => cli::task::run(cmd, json_output, project_flag.as_deref()),
        Commands::Report(cmd) => cli::report::run(cmd, json_output, project_flag.as_deref()),
        Commands::Alerts { days_ahead } => cli::alerts::run(days_ahead, json_output),
    };

    process::exit(exit_code);
}
