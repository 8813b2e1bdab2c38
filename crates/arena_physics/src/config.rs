//! Movement configuration

use serde::{Deserialize, Serialize};

/// Shared kinematic constants for the player and enemies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Downward acceleration (units/s²)
    pub gravity: f32,

    /// Exponential damping rate for horizontal velocity
    pub friction: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            gravity: 30.0,
            friction: 10.0,
        }
    }
}

impl MovementConfig {
    /// Set gravity
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set friction
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }
}
