//! # arena_physics - Static Collision and Kinematic Movement
//!
//! The arena has no rigid-body dynamics. Level geometry is a flat list of
//! axis-aligned boxes and every moving body is integrated by hand:
//!
//! ```text
//! velocity ── friction/gravity ──► tentative position
//!                                       │
//!                     ground clamp ◄────┘
//!                          │
//!              collide_and_slide(CollisionWorld)
//!                          │
//!                          ▼
//!                  resolved position
//! ```
//!
//! # Example
//!
//! ```ignore
//! use arena_physics::prelude::*;
//!
//! let world = CollisionWorld::from_colliders(vec![
//!     StaticCollider::block(ColliderKind::Wall, Vec3::new(20.0, 0.0, 0.0)),
//! ]);
//! let result = collide_and_slide(old, new, Vec3::ONE, |b| world.intersects(b));
//! ```

pub mod collider;
pub mod config;
pub mod movement;
pub mod world;

pub mod prelude {
    //! Common imports for collision and movement
    pub use crate::collider::{ColliderKind, StaticCollider, BLOCK_SIZE};
    pub use crate::config::MovementConfig;
    pub use crate::movement::{
        apply_damping_and_gravity, apply_friction, apply_gravity, clamp_to_ground,
        collide_and_slide, SlideOutcome, SlideResult,
    };
    pub use crate::world::CollisionWorld;
    pub use arena_math::{Aabb, Vec3};
}

pub use prelude::*;
