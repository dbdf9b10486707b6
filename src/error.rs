use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not determine a home directory")]
    NoHomeDir,

    #[error("I/O error on {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid config {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Row operations on a position past the end of the list.
    #[error("entry {index} out of range ({len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("failed to install log subscriber: {0}")]
    Logging(Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, Error>;
