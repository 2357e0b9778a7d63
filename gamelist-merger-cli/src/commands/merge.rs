use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamelist_merger_core::{
    FilterConfig, FilterRule, FilterStatistics, FolderComparer, Game, GameComparers, GameList,
    GameListPair, MergeError, PreferCompressed, compile, filter_config_from_flags,
    merge_game_lists, sort_by_name,
};
use gamelist_merger_xml::{
    ValidationSummary, parse_gamelist_file, validate_file, write_gamelist_file,
};

use crate::cli_types::MergeArgs;
use crate::error::CliError;
use crate::settings::{self, MergeSettings};

/// Merge behaviour after combining command-line flags with the settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MergeOptions {
    pub filter: FilterConfig,
    pub folder_match: FolderComparer,
    pub match_by_id: bool,
    pub prefer_archives: bool,
    pub sort_output: bool,
}

impl MergeOptions {
    /// Boolean flags switch a setting on; list flags extend the settings lists.
    pub(crate) fn resolve(args: &MergeArgs, settings: &MergeSettings) -> Result<Self, CliError> {
        let exclude_name_contains = combined(&settings.exclude_name_contains, &args.exclude_name_contains);
        let exclude_regions = combined(&settings.exclude_regions, &args.exclude_region);
        let include_languages = combined(&settings.include_languages, &args.include_lang);

        let mut filter = filter_config_from_flags(
            args.exclude_bios || settings.exclude_bios,
            &exclude_name_contains,
            &exclude_regions,
            &include_languages,
        );
        filter.exclude_rules.extend(parse_setting_rules("exclude_rules", &settings.exclude_rules)?);
        filter.exclude_rules.extend(args.exclude_rule.iter().cloned());
        filter.include_rules.extend(parse_setting_rules("include_rules", &settings.include_rules)?);
        filter.include_rules.extend(args.include_rule.iter().cloned());

        let folder_match = match (args.folder_match, settings.folder_match.as_deref()) {
            (Some(chosen), _) => chosen,
            (None, Some(name)) => name
                .parse()
                .map_err(|e: MergeError| setting_error("folder_match", e))?,
            (None, None) => FolderComparer::default(),
        };

        Ok(Self {
            filter,
            folder_match,
            match_by_id: args.match_by_id || settings.match_by_id,
            prefer_archives: args.prefer_archives || settings.prefer_archives,
            sort_output: args.sort_output || settings.sort_output,
        })
    }
}

fn combined(from_settings: &[String], from_flags: &[String]) -> Vec<String> {
    from_settings.iter().chain(from_flags).cloned().collect()
}

fn parse_setting_rules(key: &str, rules: &[String]) -> Result<Vec<FilterRule>, CliError> {
    rules
        .iter()
        .map(|rule| FilterRule::parse(rule).map_err(|e| setting_error(key, e)))
        .collect()
}

fn setting_error(key: &str, err: MergeError) -> CliError {
    CliError::config(format!("[merge] {key}: {err}"))
}

/// A gamelist that passed validation and was parsed.
struct LoadedGamelist {
    summary: ValidationSummary,
    list: GameList,
}

fn load_gamelist(path: &Path) -> Result<LoadedGamelist, CliError> {
    let summary = validate_file(path).map_err(CliError::Validation)?;
    let list = parse_gamelist_file(path)?;
    Ok(LoadedGamelist { summary, list })
}

/// Validate and parse both inputs concurrently.
async fn load_both(a: PathBuf, b: PathBuf) -> Result<(LoadedGamelist, LoadedGamelist), CliError> {
    let task_a = tokio::task::spawn_blocking(move || load_gamelist(&a));
    let task_b = tokio::task::spawn_blocking(move || load_gamelist(&b));
    let (a, b) = tokio::join!(task_a, task_b);

    let a = a.map_err(|e| CliError::runtime(format!("Loading task failed: {e}")))?;
    let b = b.map_err(|e| CliError::runtime(format!("Loading task failed: {e}")))?;

    match (a, b) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        (Err(ea), Err(eb)) => Err(ea.combine(eb)),
        (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
    }
}

/// Merge two gamelists, honouring the settings file.
pub(crate) fn run_merge(args: MergeArgs, verbose: bool) -> Result<(), CliError> {
    let started = Instant::now();
    let settings = settings::load_settings()?;
    let options = MergeOptions::resolve(&args, &settings.merge)?;
    execute_merge(&args, &options, verbose, started)
}

/// Run a merge with already-resolved options.
pub(crate) fn execute_merge(
    args: &MergeArgs,
    options: &MergeOptions,
    verbose: bool,
    started: Instant,
) -> Result<(), CliError> {
    if args.output.exists() && !args.overwrite {
        return Err(CliError::OutputExists(args.output.clone()));
    }

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {e}")))?;
    let (a, b) = rt.block_on(load_both(args.gamelist_a.clone(), args.gamelist_b.clone()))?;
    let (summary_a, summary_b) = (a.summary, b.summary);

    let pair = GameListPair::new(a.list, b.list);
    let (master_label, secondary_label) = if pair.master_is_first() {
        ("A", "B")
    } else {
        ("B", "A")
    };
    log::debug!("Using {master_label} file as master ({} games)", pair.master.total_games());

    let filter = compile(&options.filter);
    let game_comparer = if options.match_by_id {
        GameComparers::by_id_then_path()
    } else {
        GameComparers::default_comparer()
    };
    let preference = PreferCompressed::new(options.prefer_archives);

    let result = merge_game_lists(
        &pair.master,
        &pair.secondary,
        game_comparer,
        options.folder_match,
        &filter,
        &preference,
    );
    let merged = if options.sort_output {
        sort_by_name(result.merged)
    } else {
        result.merged
    };

    write_gamelist_file(&merged, &args.output)?;

    report_success(&summary_a, &summary_b, &args.output);
    report_filter_summary(
        &result.statistics,
        (master_label, secondary_label),
        started.elapsed(),
        verbose,
    );
    Ok(())
}

fn report_success(a: &ValidationSummary, b: &ValidationSummary, output: &Path) {
    let ok = "OK".if_supports_color(Stdout, |t| t.green());
    log::info!("{ok} A file: {} games, {} folders", a.game_count, a.folder_count);
    log::info!("{ok} B file: {} games, {} folders", b.game_count, b.folder_count);
    let output = std::path::absolute(output).unwrap_or_else(|_| output.to_path_buf());
    log::info!("{ok} Wrote merged gamelist to [{}]", output.display());
}

fn report_filter_summary(
    stats: &FilterStatistics,
    (master_label, secondary_label): (&str, &str),
    elapsed: Duration,
    verbose: bool,
) {
    let filtered = stats.total_filtered_count();
    if verbose && filtered > 0 {
        crate::log_blank();
        log::info!(
            "{} Filtered {filtered} game(s):",
            "!".if_supports_color(Stdout, |t| t.yellow())
        );
        list_filtered(master_label, &stats.master_filtered_games);
        list_filtered(secondary_label, &stats.secondary_filtered_games);
    }

    log::info!(
        "Summary: {} games merged, {filtered} filtered, completed in {:.2}s",
        stats.merged_game_count,
        elapsed.as_secs_f64()
    );
}

fn list_filtered(label: &str, games: &[Game]) {
    if games.is_empty() {
        return;
    }
    log::info!("  From {label} file:");
    for game in games {
        log::info!(
            "    - {}      {}",
            game.name.as_deref().unwrap_or_default(),
            game.path
                .as_deref()
                .unwrap_or_default()
                .if_supports_color(Stdout, |t| t.dimmed())
        );
    }
}

#[cfg(test)]
#[path = "../tests/merge_tests.rs"]
mod tests;
