use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classifier::CategoryClassifier;
use crate::db::DB_FILE;
use crate::error::{KopeykaError, Result};
use crate::parser::{MessageParser, ParserConfig, DEFAULT_CURRENCY_UNITS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub data_dir: String,
    /// Chat user id used when a command does not pass `--user`.
    #[serde(default = "default_user_id")]
    pub user_id: i64,
    #[serde(default = "default_currency_units")]
    pub currency_units: Vec<String>,
    /// JSON keyword table replacing the built-in one.
    #[serde(default)]
    pub keywords_file: Option<String>,
}

fn default_user_id() -> i64 {
    1
}

fn default_currency_units() -> Vec<String> {
    DEFAULT_CURRENCY_UNITS.iter().map(|u| u.to_string()).collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir().to_string_lossy().to_string(),
            user_id: default_user_id(),
            currency_units: default_currency_units(),
            keywords_file: None,
        }
    }
}

impl Settings {
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(DB_FILE)
    }

    pub fn parser(&self) -> MessageParser {
        MessageParser::new(&ParserConfig {
            currency_units: self.currency_units.clone(),
        })
    }

    pub fn classifier(&self) -> Result<CategoryClassifier> {
        match &self.keywords_file {
            Some(path) => CategoryClassifier::from_json_file(Path::new(path)).map_err(|e| {
                KopeykaError::Settings(format!("cannot load keyword table {path}: {e}"))
            }),
            None => Ok(CategoryClassifier::default()),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("kopeyka")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".local")
        .join("share")
        .join("kopeyka")
}

pub fn load_settings() -> Settings {
    read_settings(&settings_path())
}

fn read_settings(path: &Path) -> Settings {
    if path.exists() {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable settings, using defaults");
                Settings::default()
            }
        }
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    write_settings(&settings_path(), settings)
}

fn write_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| KopeykaError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

pub fn settings_file_exists() -> bool {
    settings_path().exists()
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .to_string_lossy()
        .to_string()
}
