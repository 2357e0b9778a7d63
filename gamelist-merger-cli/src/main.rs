//! gamelist-merger CLI
//!
//! Merge, de-duplicate and filter EmulationStation gamelist.xml files.

mod cli_types;
mod commands;
mod error;
mod logging;
mod settings;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cli_types::{Cli, Commands, ConfigAction};
use error::CliError;

/// Print an empty line through the logger so `--quiet` hides it too.
pub(crate) fn log_blank() {
    log::info!("");
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Merge(args) => commands::merge::run_merge(args, cli.verbose),
        Commands::Validate { files } => commands::validate::run_validate(&files),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(),
            ConfigAction::Path => commands::config::run_config_path(),
        },
    };

    if let Err(e) = result {
        report_error(&e);
        std::process::exit(1);
    }
}

fn report_error(err: &CliError) {
    let mark = "X".if_supports_color(Stdout, |t| t.red());
    match err {
        CliError::Validation(issues) => {
            for issue in issues {
                log::error!("{mark} {issue}");
            }
        }
        other => log::error!("{mark} {other}"),
    }
}
