use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::error::CliError;
use crate::settings::{self, CONFIG_ENV_VAR};

/// Show the settings file location and the effective merge settings.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    log::info!(
        "{}",
        "gamelist-merger Settings".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    match settings::settings_path() {
        Some(p) if p.exists() => {
            log::info!(
                "  Settings file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Settings file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Settings file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    if std::env::var_os(CONFIG_ENV_VAR).is_some() {
        log::info!("  (location set by {CONFIG_ENV_VAR})");
    }
    crate::log_blank();

    let loaded = settings::load_settings()?;
    let rendered = toml::to_string_pretty(&loaded)
        .map_err(|e| CliError::config(format!("Could not render settings: {e}")))?;
    for line in rendered.lines() {
        log::info!("  {line}");
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    match settings::settings_path() {
        Some(p) => {
            log::info!("{}", p.display());
            Ok(())
        }
        None => Err(CliError::config("Could not determine config directory")),
    }
}
