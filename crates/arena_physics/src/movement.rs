//! Kinematic movement helpers
//!
//! Bodies here are axis-aligned boxes integrated with explicit Euler steps.
//! Collision response is a per-axis slide: when the tentative box overlaps
//! something, keep only the X component of the move, else only the Z
//! component, else nothing.

use arena_math::{Aabb, Vec3};

use crate::config::MovementConfig;

/// Which part of a tentative move survived collision resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideOutcome {
    /// Nothing was hit; the full move stands
    Clear,
    /// Slid along X; the Z component was dropped
    SlidX,
    /// Slid along Z; the X component was dropped
    SlidZ,
    /// Both axes blocked; position reverted
    Blocked,
}

impl SlideOutcome {
    /// Check if any collision happened
    pub fn collided(self) -> bool {
        self != Self::Clear
    }
}

/// Result of [`collide_and_slide`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideResult {
    /// Resolved position
    pub position: Vec3,
    /// What happened
    pub outcome: SlideOutcome,
}

impl SlideResult {
    /// Zero the horizontal velocity components on blocked axes
    pub fn apply_to_velocity(&self, velocity: &mut Vec3) {
        match self.outcome {
            SlideOutcome::Clear => {}
            SlideOutcome::SlidX => velocity.z = 0.0,
            SlideOutcome::SlidZ => velocity.x = 0.0,
            SlideOutcome::Blocked => {
                velocity.x = 0.0;
                velocity.z = 0.0;
            }
        }
    }
}

/// Exponential damping of the horizontal velocity
#[inline]
pub fn apply_friction(velocity: &mut Vec3, friction: f32, dt: f32) {
    velocity.x -= velocity.x * friction * dt;
    velocity.z -= velocity.z * friction * dt;
}

/// Gravity on the vertical velocity
#[inline]
pub fn apply_gravity(velocity: &mut Vec3, gravity: f32, dt: f32) {
    velocity.y -= gravity * dt;
}

/// Friction and gravity in one step
#[inline]
pub fn apply_damping_and_gravity(velocity: &mut Vec3, config: &MovementConfig, dt: f32) {
    apply_friction(velocity, config.friction, dt);
    apply_gravity(velocity, config.gravity, dt);
}

/// Keep a body at or above `height`.
///
/// Returns true when the body was at or below and got snapped (it is standing).
/// A body resting exactly on the ground also loses its vertical velocity.
#[inline]
pub fn clamp_to_ground(position: &mut Vec3, velocity: &mut Vec3, height: f32) -> bool {
    if position.y <= height {
        velocity.y = 0.0;
        position.y = height;
        true
    } else {
        false
    }
}

/// Resolve a tentative move from `old` to `new` for a box of `half_extents`.
///
/// `blocked` answers whether a box overlaps anything solid. The Y coordinate
/// of `new` is kept by both slide attempts; a full revert restores `old`.
pub fn collide_and_slide<F>(old: Vec3, new: Vec3, half_extents: Vec3, blocked: F) -> SlideResult
where
    F: Fn(&Aabb) -> bool,
{
    let hits = |p: Vec3| blocked(&Aabb::from_center_half_extents(p, half_extents));

    if !hits(new) {
        return SlideResult {
            position: new,
            outcome: SlideOutcome::Clear,
        };
    }

    let x_only = Vec3::new(new.x, new.y, old.z);
    if !hits(x_only) {
        return SlideResult {
            position: x_only,
            outcome: SlideOutcome::SlidX,
        };
    }

    let z_only = Vec3::new(old.x, new.y, new.z);
    if !hits(z_only) {
        return SlideResult {
            position: z_only,
            outcome: SlideOutcome::SlidZ,
        };
    }

    SlideResult {
        position: old,
        outcome: SlideOutcome::Blocked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn wall_at_x(x: f32) -> Aabb {
        Aabb::new(Vec3::new(x, 0.0, -50.0), Vec3::new(x + 10.0, 10.0, 50.0))
    }

    #[test]
    fn test_friction_decays_horizontal_only() {
        let mut v = Vec3::new(10.0, 5.0, -10.0);
        apply_friction(&mut v, 10.0, 0.05);
        assert_relative_eq!(v.x, 5.0);
        assert_relative_eq!(v.z, -5.0);
        assert_relative_eq!(v.y, 5.0);
    }

    #[test]
    fn test_ground_clamp() {
        let mut p = Vec3::new(0.0, 1.5, 0.0);
        let mut v = Vec3::new(0.0, -3.0, 0.0);
        assert!(clamp_to_ground(&mut p, &mut v, 2.0));
        assert_eq!(p.y, 2.0);
        assert_eq!(v.y, 0.0);

        let mut resting = Vec3::new(0.0, 2.0, 0.0);
        let mut falling = Vec3::new(0.0, -0.5, 0.0);
        assert!(clamp_to_ground(&mut resting, &mut falling, 2.0));
        assert_eq!(resting.y, 2.0);
        assert_eq!(falling.y, 0.0);

        let mut high = Vec3::new(0.0, 4.0, 0.0);
        let mut rising = Vec3::new(0.0, 1.0, 0.0);
        assert!(!clamp_to_ground(&mut high, &mut rising, 2.0));
        assert_eq!(rising.y, 1.0);
    }

    #[test]
    fn test_clear_move_passes_through() {
        let result = collide_and_slide(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0), Vec3::ONE, |_| false);
        assert_eq!(result.outcome, SlideOutcome::Clear);
        assert_eq!(result.position, Vec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_diagonal_into_wall_slides_along_z() {
        let wall = wall_at_x(5.0);
        let old = Vec3::new(3.5, 2.0, 0.0);
        let new = Vec3::new(4.5, 2.0, 1.0);

        let result = collide_and_slide(old, new, Vec3::ONE, |b| b.intersects(&wall));
        assert_eq!(result.outcome, SlideOutcome::SlidZ);
        assert_eq!(result.position, Vec3::new(3.5, 2.0, 1.0));

        let mut v = Vec3::new(20.0, 0.0, 20.0);
        result.apply_to_velocity(&mut v);
        assert_eq!(v, Vec3::new(0.0, 0.0, 20.0));
    }

    #[test]
    fn test_corner_reverts() {
        let walls = [
            wall_at_x(5.0),
            Aabb::new(Vec3::new(-50.0, 0.0, 5.0), Vec3::new(50.0, 10.0, 15.0)),
        ];
        let old = Vec3::new(3.5, 2.0, 3.5);
        let new = Vec3::new(4.5, 2.0, 4.5);

        let result = collide_and_slide(old, new, Vec3::ONE, |b| walls.iter().any(|w| w.intersects(b)));
        assert_eq!(result.outcome, SlideOutcome::Blocked);
        assert_eq!(result.position, old);
    }

    #[test]
    fn test_x_slide_preferred() {
        // Wall ahead in Z only; moving diagonally keeps the X part
        let wall = Aabb::new(Vec3::new(-50.0, 0.0, 5.0), Vec3::new(50.0, 10.0, 15.0));
        let old = Vec3::new(0.0, 2.0, 3.5);
        let new = Vec3::new(1.0, 2.0, 4.5);

        let result = collide_and_slide(old, new, Vec3::ONE, |b| b.intersects(&wall));
        assert_eq!(result.outcome, SlideOutcome::SlidX);
        assert_eq!(result.position, Vec3::new(1.0, 2.0, 3.5));
    }
}
