//! Command-line front end for `match_core`: loads a JSON dataset into the
//! in-memory store and runs scoring, candidate search or a full sweep over it.

pub mod commands;
pub mod dataset;
pub mod logging;
pub mod notifier;

use std::path::PathBuf;

use match_core::MatchError;
use thiserror::Error;

pub use commands::{ScoreReport, SweepReport};
pub use dataset::{load_criteria, Dataset};
pub use notifier::LoggingNotifier;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to render output: {0}")]
    Render(#[source] serde_json::Error),
    #[error(transparent)]
    Match(#[from] MatchError),
}
