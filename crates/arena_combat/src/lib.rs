//! Arena Combat - Health, Weapons and Projectiles
//!
//! # Features
//!
//! - Health component clamped at zero with one-shot death reporting
//! - Player weapon set with fire delay, finite/infinite ammo and wrapping switch
//! - Enemy projectiles tested against the player box and level geometry
//!
//! # Example
//!
//! ```ignore
//! use arena_combat::prelude::*;
//!
//! let mut health = HealthComponent::new(150.0);
//! let (dealt, died) = health.apply_damage(25.0);
//!
//! let mut weapons = WeaponSet::default();
//! if let FireResult::Fired { damage, .. } = weapons.try_fire(now) {
//!     // raycast and apply `damage`
//! }
//! ```

pub mod health;
pub mod projectile;
pub mod weapon;

pub mod prelude {
    pub use crate::health::HealthComponent;
    pub use crate::projectile::{Projectile, ProjectileConfig, ProjectileReport, ProjectileSystem};
    pub use crate::weapon::{FireResult, WeaponSet, WeaponStats};
}

pub use prelude::*;
