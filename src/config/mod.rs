//! Loads and saves the small JSON config file that tells the CLI where its working
//! directories and database live.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILE_NAME: &str = ".lexdawg_config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not determine the user's home directory")]
    NoHomeDir,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub raw_dict_dir: PathBuf,
    pub dawg_save_dir: PathBuf,
}

impl Config {
    fn file_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(CONFIG_FILE_NAME))
    }

    fn defaults() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        let root = home.join(".lexdawg");
        Ok(Config {
            db_path: root.join("lexicon.sqlite3"),
            raw_dict_dir: root.join("raw"),
            dawg_save_dir: root.join("dawgs"),
        })
    }

    /// Reads the config file, creating it with defaults on first run if absent.
    pub fn load_or_init() -> Result<Self, ConfigError> {
        let path = Self::file_path()?;
        if !path.exists() {
            let cfg = Self::defaults()?;
            cfg.save()?;
            return Ok(cfg);
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::file_path()?;
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Ensures `raw_dict_dir` and `dawg_save_dir` exist, creating them if necessary.
    pub fn ensure_directories(&self) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.raw_dict_dir)?;
        fs::create_dir_all(&self.dawg_save_dir)?;
        Ok(())
    }
}
