//! # arena_core - Arena Simulation Core Primitives
//!
//! Foundational building blocks shared by every simulation crate:
//! - **Handles**: generational indices that detect stale references
//! - **Pools**: bounded reuse of frequently spawned actors
//! - **Deferred actions**: work scheduled for a future tick boundary
//!
//! Nothing here knows about enemies, doors or players. The game crates
//! plug their own types in through the [`Poolable`] trait.

pub mod deferred;
pub mod error;
pub mod handle;
pub mod pool;

pub use deferred::*;
pub use error::*;
pub use handle::*;
pub use pool::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::deferred::DeferredQueue;
    pub use crate::error::{CoreError, Result};
    pub use crate::handle::Handle;
    pub use crate::pool::{EntityPool, PoolStats, Poolable};
}
