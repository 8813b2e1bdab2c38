//! # arena_math - Simulation Math
//!
//! Small math layer on top of `glam` used by every movement and collision
//! routine in the arena simulation:
//! - [`Aabb`] for all collision tests
//! - [`Ray`] for hitscan queries
//! - horizontal (XZ-plane) helpers, since gameplay distances ignore height

pub mod bounds;
pub mod ray;

pub use bounds::*;
pub use ray::*;

pub use glam::{Vec2, Vec3};

/// Common math constants
pub mod consts {
    pub const PI: f32 = core::f32::consts::PI;
    pub const TAU: f32 = PI * 2.0;
    pub const DEG_TO_RAD: f32 = PI / 180.0;
    pub const EPSILON: f32 = 1e-6;
}

/// Convert degrees to radians
#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees * consts::DEG_TO_RAD
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Distance between two points on the XZ plane
#[inline]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

/// Yaw (rotation about +Y) that makes an object at `from` face `to`.
///
/// Uses the convention that yaw 0 looks down -Z.
#[inline]
pub fn yaw_towards(from: Vec3, to: Vec3) -> f32 {
    let dx = to.x - from.x;
    let dz = to.z - from.z;
    (-dx).atan2(-dz)
}

/// Forward vector on the XZ plane for a yaw angle (yaw 0 looks down -Z)
#[inline]
pub fn yaw_forward(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Right vector on the XZ plane for a yaw angle
#[inline]
pub fn yaw_right(yaw: f32) -> Vec3 {
    Vec3::new(yaw.cos(), 0.0, -yaw.sin())
}

/// Look direction for a yaw/pitch pair
#[inline]
pub fn look_direction(yaw: f32, pitch: f32) -> Vec3 {
    let (sp, cp) = pitch.sin_cos();
    Vec3::new(-yaw.sin() * cp, sp, -yaw.cos() * cp)
}
