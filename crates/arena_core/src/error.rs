//! Error types for the core library

use thiserror::Error;

/// The core error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Handle is null
    #[error("Handle is null")]
    NullHandle,
    /// Handle is stale (slot was released or reused since)
    #[error("Handle is stale: slot {index} is at generation {current}, handle has {held}")]
    StaleHandle { index: u32, held: u32, current: u32 },
    /// Handle index out of bounds
    #[error("Handle index {0} out of bounds")]
    OutOfBounds(u32),
}

/// Result type alias
pub type Result<T> = core::result::Result<T, CoreError>;
