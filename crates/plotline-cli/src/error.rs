//! Error types for the plotline CLI.

use std::path::PathBuf;

use plotline_charts::DataError;
use plotline_yaml::ParseError;
use thiserror::Error;

/// Everything that can stop a command.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Reading or writing a file failed.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing to stdout failed.
    #[error("IO error: {0}")]
    Stdout(#[from] std::io::Error),

    /// The data file is not a dataset.
    #[error("Invalid data: {0}")]
    Data(#[from] DataError),

    /// The manifest failed to parse or validate.
    #[error("Manifest invalid: {0}")]
    Manifest(#[from] ParseError),

    /// Scene serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Neither a manifest nor a preset was given.
    #[error("a chart source is required: pass --manifest or --preset")]
    NoChart,
}

impl CliError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
