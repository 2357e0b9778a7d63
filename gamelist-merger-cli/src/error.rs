use std::path::PathBuf;

use gamelist_merger_xml::{ValidationIssue, XmlError};
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Reading or writing a gamelist failed
    #[error("Gamelist error: {0}")]
    Gamelist(#[from] XmlError),

    /// One or more input files failed validation
    #[error("{} validation issue(s) found", .0.len())]
    Validation(Vec<ValidationIssue>),

    /// Refusing to replace an existing output file
    #[error("Output file [{}] already exists. Use --overwrite to replace it.", .0.display())]
    OutputExists(PathBuf),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Combine the failures of two independent loads, keeping every
    /// validation issue when both failed validation.
    pub(crate) fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Self::Validation(mut first), Self::Validation(second)) => {
                first.extend(second);
                Self::Validation(first)
            }
            (first, _) => first,
        }
    }
}
