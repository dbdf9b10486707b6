use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::{
    app::DIR_NAME,
    error::{Error, Result},
};

const FILE_NAME: &str = "config.json";

/// User settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Empty subject rows the form opens with.
    pub initial_rows: usize,
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_rows: 1,
            log_level: "info".to_owned(),
        }
    }
}

impl Config {
    pub fn get_config_file() -> Result<PathBuf> {
        let dirs = BaseDirs::new().ok_or(Error::NoHomeDir)?;
        Ok(dirs.config_dir().join(DIR_NAME).join(FILE_NAME))
    }

    /// Reads the default config file, falling back to defaults when it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_file()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(Error::Io {
                    path: path.to_owned(),
                    source,
                });
            }
        };

        serde_json::from_str(&text).map_err(|source| Error::Json {
            path: path.to_owned(),
            source,
        })
    }
}
