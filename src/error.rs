use thiserror::Error;

use crate::classifier::ConfigError;

#[derive(Error, Debug)]
pub enum KopeykaError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Keyword table error: {0}")]
    Config(#[from] ConfigError),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, KopeykaError>;
