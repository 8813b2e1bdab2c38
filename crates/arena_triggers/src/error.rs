//! Trigger loading errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading trigger definitions
#[derive(Debug, Error)]
pub enum TriggerError {
    /// Definition file could not be read
    #[error("Failed to read trigger file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Definition text is not valid trigger JSON
    #[error("Invalid trigger definition: {0}")]
    Parse(#[from] serde_json::Error),

    /// A trigger definition is unusable
    #[error("Invalid trigger '{id}': {reason}")]
    Invalid { id: String, reason: String },
}

/// Result type for trigger operations
pub type Result<T> = std::result::Result<T, TriggerError>;
