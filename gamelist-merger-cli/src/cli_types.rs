//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use gamelist_merger_core::{FilterRule, FolderComparer};

#[derive(Parser)]
#[command(name = "gamelist-merger", version)]
#[command(
    about = "Merge, de-duplicate and optionally filter EmulationStation gamelist.xml files",
    long_about = None
)]
pub(crate) struct Cli {
    /// Only show errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable debug logging and list the games removed by filters
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Merge two gamelists into one output file
    Merge(MergeArgs),

    /// Check gamelist files for structural problems
    Validate {
        /// Gamelist files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Inspect the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments for `merge`.
#[derive(Args, Clone, Debug)]
pub(crate) struct MergeArgs {
    /// Path to the first gamelist.xml file
    #[arg(short = 'a', long = "gamelist-a", alias = "gamelistA", value_name = "FILE")]
    pub gamelist_a: PathBuf,

    /// Path to the second gamelist.xml file
    #[arg(short = 'b', long = "gamelist-b", alias = "gamelistB", value_name = "FILE")]
    pub gamelist_b: PathBuf,

    /// Path for the merged output file
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Exclude BIOS entries (names containing [BIOS] or (BIOS))
    #[arg(long)]
    pub exclude_bios: bool,

    /// Exclude games whose name contains any of these (e.g., Demo,Beta)
    #[arg(long, value_delimiter = ',', value_name = "VALUES")]
    pub exclude_name_contains: Vec<String>,

    /// Exclude games from these regions (e.g., jp,eu)
    #[arg(long, value_delimiter = ',', value_name = "REGIONS")]
    pub exclude_region: Vec<String>,

    /// Only include games with these languages (e.g., en,fr)
    #[arg(long, value_delimiter = ',', value_name = "LANGUAGES")]
    pub include_lang: Vec<String>,

    /// Extra exclude rule as PROPERTY:OPERATION[:VALUE,...] (e.g., genre:contains:Casino)
    #[arg(long, value_name = "RULE")]
    pub exclude_rule: Vec<FilterRule>,

    /// Extra include rule as PROPERTY:OPERATION[:VALUE,...] (e.g., image:hasvalue)
    #[arg(long, value_name = "RULE")]
    pub include_rule: Vec<FilterRule>,

    /// Prefer the .zip/.7z entry when both lists have the same game
    #[arg(long)]
    pub prefer_archives: bool,

    /// Sort games by name in the output file
    #[arg(long, alias = "sortOutput")]
    pub sort_output: bool,

    /// Replace the output file if it exists
    #[arg(long)]
    pub overwrite: bool,

    /// Folder field used to match folders across lists: path, name or id [default: name]
    #[arg(long, value_name = "FIELD")]
    pub folder_match: Option<FolderComparer>,

    /// Match games by id first, then by path
    #[arg(long)]
    pub match_by_id: bool,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective settings and where they come from
    Show,

    /// Print the settings file path
    Path,
}

#[cfg(test)]
#[path = "tests/cli_types_tests.rs"]
mod tests;
