//! Doors and the door registry
//!
//! A door is a square panel that slides up to open. Its vertical offset
//! eases toward the target each update and snaps once close enough; only a
//! closed door blocks movement. Open doors close on their own once the player
//! wanders far enough away.

use arena_math::{horizontal_distance, radians, Aabb, Vec3};

use crate::config::DoorConfig;
use crate::level::DoorPlacement;

/// A single sliding door
#[derive(Debug, Clone, PartialEq)]
pub struct Door {
    /// Center on the floor (Y unused)
    pub position: Vec3,
    /// Rotation about +Y in radians
    pub rotation: f32,
    /// Open flag
    pub is_open: bool,
    /// Simulation time of the last opening
    pub opened_at: Option<f32>,
    /// Center height when closed
    pub closed_offset: f32,
    /// Center height when open
    pub open_offset: f32,
    /// Height being eased toward
    pub target_offset: f32,
    /// Current center height
    pub offset: f32,
    /// Panel width and height
    pub size: f32,
}

impl Door {
    /// Create a closed door
    pub fn new(placement: &DoorPlacement, config: &DoorConfig) -> Self {
        Self {
            position: Vec3::new(placement.position.x, 0.0, placement.position.z),
            rotation: radians(placement.rotation),
            is_open: false,
            opened_at: None,
            closed_offset: config.closed_offset,
            open_offset: config.open_offset,
            target_offset: config.closed_offset,
            offset: config.closed_offset,
            size: config.size,
        }
    }

    /// Current panel center
    pub fn center(&self) -> Vec3 {
        Vec3::new(self.position.x, self.offset, self.position.z)
    }

    /// Open the door; returns false if it was already open
    pub fn open(&mut self, now: f32) -> bool {
        if self.is_open {
            return false;
        }
        self.is_open = true;
        self.opened_at = Some(now);
        self.target_offset = self.open_offset;
        true
    }

    /// Close the door; returns false if it was already closed
    pub fn close(&mut self) -> bool {
        if !self.is_open {
            return false;
        }
        self.is_open = false;
        self.target_offset = self.closed_offset;
        true
    }

    /// Ease the panel and auto-close; returns true if the door closed
    pub fn update(&mut self, dt: f32, player_position: Vec3, config: &DoorConfig) -> bool {
        let gap = self.target_offset - self.offset;
        if gap.abs() > config.snap_threshold {
            self.offset += gap * config.ease_rate * dt;
        } else {
            self.offset = self.target_offset;
        }
        let low = self.closed_offset.min(self.open_offset);
        let high = self.closed_offset.max(self.open_offset);
        self.offset = self.offset.clamp(low, high);

        if self.is_open && horizontal_distance(player_position, self.position) > config.auto_close_distance {
            return self.close();
        }
        false
    }

    /// Check if the player is close enough to open the door
    pub fn is_player_near(&self, player_position: Vec3, radius: f32) -> bool {
        player_position.distance(self.center()) < radius
    }

    /// Panel bounds, inflated by `margin` in X and Z
    pub fn blocking_box(&self, margin: f32) -> Aabb {
        let half = self.size * 0.5;
        let (sin, cos) = self.rotation.sin_cos();
        let half_extents = Vec3::new((cos * half).abs(), half, (sin * half).abs());
        Aabb::from_center_half_extents(self.center(), half_extents).expand_horizontal(margin)
    }
}

/// Every door of the current level
#[derive(Debug, Clone, Default)]
pub struct DoorRegistry {
    doors: Vec<Door>,
    config: DoorConfig,
}

impl DoorRegistry {
    /// Create an empty registry
    pub fn new(config: DoorConfig) -> Self {
        Self {
            doors: Vec::new(),
            config,
        }
    }

    /// Replace every door with the placements of a new level
    pub fn rebuild(&mut self, placements: &[DoorPlacement]) {
        self.doors = placements.iter().map(|p| Door::new(p, &self.config)).collect();
        log::debug!("Door registry rebuilt with {} doors", self.doors.len());
    }

    /// Drop every door
    pub fn clear(&mut self) {
        self.doors.clear();
    }

    /// Open every door within reach of the player; true if any opened
    pub fn try_open_nearest(&mut self, player_position: Vec3, now: f32) -> bool {
        let radius = self.config.open_radius;
        let mut opened = false;
        for (index, door) in self.doors.iter_mut().enumerate() {
            if door.is_player_near(player_position, radius) && door.open(now) {
                log::debug!("Door {} opened", index);
                opened = true;
            }
        }
        opened
    }

    /// Advance every door; returns how many closed on their own
    pub fn update(&mut self, dt: f32, player_position: Vec3) -> usize {
        let mut closed = 0;
        for (index, door) in self.doors.iter_mut().enumerate() {
            if door.update(dt, player_position, &self.config) {
                log::debug!("Door {} closed", index);
                closed += 1;
            }
        }
        closed
    }

    /// Check if any closed door overlaps a box
    pub fn blocks(&self, aabb: &Aabb) -> bool {
        let margin = self.config.block_margin;
        self.doors
            .iter()
            .filter(|d| !d.is_open)
            .any(|d| d.blocking_box(margin).intersects(aabb))
    }

    /// Get a door
    pub fn get(&self, index: usize) -> Option<&Door> {
        self.doors.get(index)
    }

    /// Get a door mutably
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Door> {
        self.doors.get_mut(index)
    }

    /// Iterate over doors
    pub fn iter(&self) -> impl Iterator<Item = &Door> {
        self.doors.iter()
    }

    /// Number of doors
    pub fn len(&self) -> usize {
        self.doors.len()
    }

    /// Check if there are no doors
    pub fn is_empty(&self) -> bool {
        self.doors.is_empty()
    }

    /// Door tuning
    pub fn config(&self) -> &DoorConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn registry_with_door_at_origin() -> DoorRegistry {
        let mut registry = DoorRegistry::new(DoorConfig::default());
        registry.rebuild(&[DoorPlacement {
            position: Vec3::ZERO,
            rotation: 0.0,
        }]);
        registry
    }

    #[test]
    fn test_open_close_are_idempotent() {
        let mut door = Door::new(&DoorPlacement { position: Vec3::ZERO, rotation: 0.0 }, &DoorConfig::default());
        assert!(door.open(1.0));
        assert!(!door.open(2.0));
        assert_eq!(door.opened_at, Some(1.0));
        assert!(door.close());
        assert!(!door.close());
    }

    #[test]
    fn test_offset_eases_then_snaps() {
        let config = DoorConfig::default();
        let mut door = Door::new(&DoorPlacement { position: Vec3::ZERO, rotation: 0.0 }, &config);
        door.open(0.0);

        door.update(0.05, Vec3::ZERO, &config);
        assert_relative_eq!(door.offset, 5.0 + 15.0 * 8.0 * 0.05);

        for _ in 0..200 {
            door.update(0.05, Vec3::ZERO, &config);
            assert!(door.offset >= config.closed_offset && door.offset <= config.open_offset);
        }
        assert_eq!(door.offset, config.open_offset);
    }

    #[test]
    fn test_large_step_stays_in_range() {
        let config = DoorConfig::default();
        let mut door = Door::new(&DoorPlacement { position: Vec3::ZERO, rotation: 0.0 }, &config);
        door.open(0.0);
        door.update(1.0, Vec3::ZERO, &config);
        assert_eq!(door.offset, config.open_offset);
    }

    #[test]
    fn test_try_open_nearest_uses_reach() {
        let mut registry = registry_with_door_at_origin();
        assert!(!registry.try_open_nearest(Vec3::new(0.0, 2.0, 9.0), 0.0));
        assert!(registry.try_open_nearest(Vec3::new(0.0, 2.0, 5.0), 0.0));
        assert!(!registry.try_open_nearest(Vec3::new(0.0, 2.0, 5.0), 0.1));
    }

    #[test]
    fn test_auto_close_beyond_distance() {
        let mut registry = registry_with_door_at_origin();
        registry.try_open_nearest(Vec3::new(0.0, 2.0, 5.0), 0.0);

        assert_eq!(registry.update(0.016, Vec3::new(0.0, 2.0, 14.0)), 0);
        assert!(registry.get(0).unwrap().is_open);

        assert_eq!(registry.update(0.016, Vec3::new(0.0, 2.0, 20.0)), 1);
        assert!(!registry.get(0).unwrap().is_open);
    }

    #[test]
    fn test_only_closed_doors_block() {
        let mut registry = registry_with_door_at_origin();
        let player = Aabb::from_center_half_extents(Vec3::new(0.0, 2.0, 1.1), Vec3::ONE);
        assert!(registry.blocks(&player));

        registry.try_open_nearest(Vec3::new(0.0, 2.0, 1.1), 0.0);
        assert!(!registry.blocks(&player));
    }

    #[test]
    fn test_blocking_box_follows_rotation() {
        let config = DoorConfig::default();
        let spans_x = Door::new(&DoorPlacement { position: Vec3::ZERO, rotation: 0.0 }, &config).blocking_box(0.2);
        let spans_z = Door::new(&DoorPlacement { position: Vec3::ZERO, rotation: 90.0 }, &config).blocking_box(0.2);

        assert_relative_eq!(spans_x.max.x, 5.2);
        assert_relative_eq!(spans_x.max.z, 0.2);
        assert_relative_eq!(spans_z.max.x, 0.2, epsilon = 1e-5);
        assert_relative_eq!(spans_z.max.z, 5.2, epsilon = 1e-5);
        assert_relative_eq!(spans_x.min.y, 0.0);
        assert_relative_eq!(spans_x.max.y, 10.0);
    }

    #[test]
    fn test_rebuild_replaces_doors() {
        let mut registry = registry_with_door_at_origin();
        registry.rebuild(&[]);
        assert!(registry.is_empty());
    }
}
