use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gamelist_merger_xml::validate_file;

use crate::error::CliError;

/// Validate each file and report its counts or issues.
///
/// Every file is checked even when an earlier one fails.
pub(crate) fn run_validate(files: &[PathBuf]) -> Result<(), CliError> {
    let mut failed = 0usize;

    for path in files {
        match validate_file(path) {
            Ok(summary) => {
                log::info!(
                    "{} {}: {} games, {} folders",
                    "OK".if_supports_color(Stdout, |t| t.green()),
                    path.display(),
                    summary.game_count,
                    summary.folder_count
                );
            }
            Err(issues) => {
                failed += 1;
                for issue in issues {
                    log::error!("{} {issue}", "X".if_supports_color(Stdout, |t| t.red()));
                }
            }
        }
    }

    if failed > 0 {
        return Err(CliError::other(format!(
            "{failed} of {} file(s) failed validation",
            files.len()
        )));
    }
    Ok(())
}
