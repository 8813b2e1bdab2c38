//! Frame snapshots for presentation
//!
//! The simulation never renders. After a tick the host takes a
//! [`FrameSnapshot`] and hands it to whatever [`Presenter`] it uses.

use std::collections::HashMap;

use arena_ai::AnimationState;
use arena_math::Vec3;

use crate::level::ItemKind;

/// Player camera state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    /// Eye position
    pub position: Vec3,
    /// Yaw in radians
    pub yaw: f32,
    /// Pitch in radians
    pub pitch: f32,
    /// Weapon kick
    pub recoil: f32,
    /// Active weapon slot
    pub weapon_index: usize,
    /// Health
    pub health: f32,
}

/// One visible enemy
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyView {
    /// Enemy type
    pub type_id: String,
    /// Center position
    pub position: Vec3,
    /// Facing
    pub yaw: f32,
    /// Animation frame
    pub animation: AnimationState,
    /// Asset for the frame
    pub sprite: String,
    /// Showing the hit tint
    pub hit_flash: bool,
}

/// One door panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorView {
    /// Center on the floor
    pub position: Vec3,
    /// Rotation in radians
    pub rotation: f32,
    /// Panel center height
    pub offset: f32,
    /// Open flag
    pub is_open: bool,
}

/// One uncollected item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickupView {
    /// Item kind
    pub kind: ItemKind,
    /// Position
    pub position: Vec3,
}

/// Everything a presenter needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    /// Simulation time
    pub time: f32,
    /// Camera
    pub player: PlayerView,
    /// Visible enemies
    pub enemies: Vec<EnemyView>,
    /// Doors
    pub doors: Vec<DoorView>,
    /// Projectile positions
    pub projectiles: Vec<Vec3>,
    /// Items
    pub pickups: Vec<PickupView>,
    /// Temporary world tint (0xRRGGBB)
    pub world_tint: Option<u32>,
}

/// Consumer of frame snapshots
pub trait Presenter {
    /// Draw one frame
    fn render(&mut self, frame: &FrameSnapshot);
}

/// Presenter that draws nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn render(&mut self, _frame: &FrameSnapshot) {}
}

/// Maps (enemy type, animation frame) to an asset key
#[derive(Debug, Clone, Default)]
pub struct SpriteTable {
    entries: HashMap<(String, AnimationState), String>,
    fallback: String,
}

impl SpriteTable {
    /// Create an empty table with a fallback asset
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            entries: HashMap::new(),
            fallback: fallback.into(),
        }
    }

    /// Table with the stock frame names for each type id
    pub fn for_types<'a>(type_ids: impl IntoIterator<Item = &'a str>) -> Self {
        let mut table = Self::new("enemies/enemy.png");
        for id in type_ids {
            for (state, frame) in [
                (AnimationState::Idle, "idle"),
                (AnimationState::WalkA, "walk1"),
                (AnimationState::WalkB, "walk2"),
                (AnimationState::Shooting, "shoot"),
            ] {
                table.insert(id, state, format!("enemies/{}/{}.png", id, frame));
            }
        }
        table
    }

    /// Set the asset for a type and frame
    pub fn insert(&mut self, type_id: &str, state: AnimationState, asset: impl Into<String>) {
        self.entries.insert((type_id.to_string(), state), asset.into());
    }

    /// Asset for a type and frame, or the fallback
    pub fn lookup(&self, type_id: &str, state: AnimationState) -> &str {
        self.entries
            .get(&(type_id.to_string(), state))
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_lookup() {
        let table = SpriteTable::for_types(["pablo", "pera"]);
        assert_eq!(table.lookup("pablo", AnimationState::WalkB), "enemies/pablo/walk2.png");
        assert_eq!(table.lookup("pera", AnimationState::Shooting), "enemies/pera/shoot.png");
        assert_eq!(table.lookup("ghost", AnimationState::Idle), "enemies/enemy.png");
    }
}
