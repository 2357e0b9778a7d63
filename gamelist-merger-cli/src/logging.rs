//! Logger setup.
//!
//! Console output goes through the `log` facade, so the logger writes info,
//! warning and error records to stdout as bare messages. The level comes from
//! `RUST_LOG` when set, otherwise from `--quiet` / `--verbose`.

use std::env;
use std::io::Write;

use env_logger::{Builder, Target};
use log::{Level, LevelFilter};

pub(crate) fn init_logging(verbose: bool, quiet: bool) {
    let use_env = env::var("RUST_LOG").is_ok();

    let mut builder = Builder::new();
    if use_env {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    builder.target(Target::Stdout);
    builder.format(|buf, record| match record.level() {
        Level::Error | Level::Warn | Level::Info => writeln!(buf, "{}", record.args()),
        level => writeln!(buf, "[{level} {}] {}", record.target(), record.args()),
    });
    builder.init();

    if !use_env {
        log::debug!(
            "Logging initialized at level: {:?}",
            determine_level(verbose, quiet)
        );
    }
}

fn determine_level(verbose: bool, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}
