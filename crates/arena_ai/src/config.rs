//! Enemy behavior tuning shared by every type

use serde::{Deserialize, Serialize};

/// Constants for enemy AI and pooling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Height enemies stand at
    pub ground_height: f32,
    /// Contact damage applies below this distance to the player
    pub melee_range: f32,
    /// Seconds between contact hits from one enemy
    pub melee_cooldown: f32,
    /// Seconds a ranged enemy shows its shooting pose
    pub shoot_duration: f32,
    /// Shots aim this far below the player's eye
    pub aim_drop: f32,
    /// Seconds per walk animation frame
    pub walk_frame_time: f32,
    /// Released enemies retained for reuse
    pub pool_capacity: usize,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            ground_height: 1.0,
            melee_range: 2.5,
            melee_cooldown: 1.0,
            shoot_duration: 0.5,
            aim_drop: 0.5,
            walk_frame_time: 0.25,
            pool_capacity: 20,
        }
    }
}
