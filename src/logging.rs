//! The form owns the terminal, so logs go to a file under the data directory.

use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
    sync::Mutex,
};

use directories::BaseDirs;
use tracing_subscriber::EnvFilter;

use crate::{
    app::DIR_NAME,
    error::{Error, Result},
};

const FILE_NAME: &str = "gradebook.log";

pub fn get_log_file() -> Result<PathBuf> {
    let dirs = BaseDirs::new().ok_or(Error::NoHomeDir)?;
    Ok(dirs.data_dir().join(DIR_NAME).join(FILE_NAME))
}

/// Installs the global subscriber. `RUST_LOG` wins over `level`.
pub fn init(level: &str) -> Result<PathBuf> {
    let path = get_log_file()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|source| Error::Io {
            path: dir.to_owned(),
            source,
        })?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(Error::Logging)?;

    Ok(path)
}
