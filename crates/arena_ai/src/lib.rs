//! Arena AI - Enemies
//!
//! Enemy types, per-tick enemy behavior, and the pooled manager that owns
//! every enemy instance.
//!
//! # Features
//!
//! - Data-driven enemy roster (melee and ranged types)
//! - Straight-line pursuit with discard-on-collision movement
//! - Contact damage and ranged shots on independent cooldowns
//! - Explicit animation states for presentation
//! - Generational pooling: stale handles never touch a reused enemy
//!
//! # Example
//!
//! ```ignore
//! use arena_ai::prelude::*;
//!
//! let mut enemies = EnemyManager::new(EnemyRoster::default(), EnemyConfig::default());
//! let handle = enemies.spawn("pablo", spawn_point, now);
//! let report = enemies.update(&ctx, &mut projectiles);
//! ```

pub mod archetype;
pub mod config;
pub mod enemy;
pub mod manager;

pub mod prelude {
    pub use crate::archetype::{EnemyArchetype, EnemyRoster, RangedAttack};
    pub use crate::config::EnemyConfig;
    pub use crate::enemy::{AiContext, AiOutput, AiState, AnimationState, Enemy, ShotRequest};
    pub use crate::manager::{ContactHit, DamageOutcome, EnemyManager, EnemyRayHit, EnemyUpdateReport};
}

pub use prelude::*;
