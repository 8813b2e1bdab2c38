//! Session setup errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration or levels
#[derive(Debug, Error)]
pub enum GameError {
    /// A file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration text is not valid TOML for [`SimConfig`](crate::SimConfig)
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The level provider has no level by that name
    #[error("Level not found: {0}")]
    LevelNotFound(String),

    /// Level text is not valid level JSON
    #[error("Invalid level data: {0}")]
    LevelParse(#[from] serde_json::Error),

    /// Trigger definitions failed to load
    #[error(transparent)]
    Triggers(#[from] arena_triggers::TriggerError),
}

/// Result type for session setup
pub type Result<T> = std::result::Result<T, GameError>;
