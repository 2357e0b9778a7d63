//! Optional settings file with defaults for `merge`.
//!
//! The file lives at `~/.config/gamelist-merger/settings.toml` unless
//! `GAMELIST_MERGER_CONFIG` points elsewhere. A missing file means defaults;
//! a malformed one is an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// Environment variable that overrides the settings file location.
pub(crate) const CONFIG_ENV_VAR: &str = "GAMELIST_MERGER_CONFIG";

/// TOML settings file format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    pub merge: MergeSettings,
}

/// The `[merge]` table. Command-line flags switch these on or add to the lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct MergeSettings {
    pub prefer_archives: bool,
    pub sort_output: bool,
    pub match_by_id: bool,
    pub exclude_bios: bool,
    pub exclude_name_contains: Vec<String>,
    pub exclude_regions: Vec<String>,
    pub include_languages: Vec<String>,
    /// Rules written as `PROPERTY:OPERATION[:VALUE,...]`
    pub exclude_rules: Vec<String>,
    pub include_rules: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_match: Option<String>,
}

/// Where the settings file is read from, if a location can be determined.
pub(crate) fn settings_path() -> Option<PathBuf> {
    if let Some(custom) = std::env::var_os(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(custom));
    }
    dirs::config_dir().map(|d| d.join("gamelist-merger").join("settings.toml"))
}

/// Load settings from the default location.
pub(crate) fn load_settings() -> Result<Settings, CliError> {
    match settings_path() {
        Some(path) => load_settings_from(&path),
        None => Ok(Settings::default()),
    }
}

/// Load settings from `path`; a missing file yields the defaults.
pub(crate) fn load_settings_from(path: &Path) -> Result<Settings, CliError> {
    if !path.exists() {
        log::debug!("No settings file at {}, using defaults", path.display());
        return Ok(Settings::default());
    }
    let contents = std::fs::read_to_string(path)?;
    let settings = parse_settings(&contents)
        .map_err(|e| CliError::config(format!("{}: {e}", path.display())))?;
    log::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

pub(crate) fn parse_settings(contents: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(contents)
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
