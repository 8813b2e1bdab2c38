//! Static level colliders

use arena_math::{Aabb, Vec3};
use serde::{Deserialize, Serialize};

/// Edge length of one level grid block
pub const BLOCK_SIZE: f32 = 10.0;

/// What a static collider represents in the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColliderKind {
    /// Full-height wall block
    Wall,
    /// Half-height bush block
    Bush,
    /// Narrow, short brick block
    Brick,
    /// Imported model with a tall footprint box
    Model,
}

impl ColliderKind {
    /// Footprint width (X and Z) and height of a block of this kind
    pub fn block_dimensions(self) -> (f32, f32) {
        match self {
            Self::Wall => (BLOCK_SIZE, BLOCK_SIZE),
            Self::Bush => (BLOCK_SIZE, BLOCK_SIZE * 0.5),
            Self::Brick => (BLOCK_SIZE * 0.7, BLOCK_SIZE * 0.6),
            Self::Model => (5.0, 500.0),
        }
    }
}

/// One piece of immutable level geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticCollider {
    /// Floor-level anchor position
    pub position: Vec3,
    /// World-space bounds
    pub aabb: Aabb,
    /// Only solid colliders block movement
    pub solid: bool,
    /// Collider kind
    pub kind: ColliderKind,
}

impl StaticCollider {
    /// Create a solid collider from explicit bounds
    pub fn new(kind: ColliderKind, aabb: Aabb) -> Self {
        let center = aabb.center();
        Self {
            position: Vec3::new(center.x, aabb.min.y, center.z),
            aabb,
            solid: true,
            kind,
        }
    }

    /// Create a block standing on the floor at `position` (only X and Z are used)
    pub fn block(kind: ColliderKind, position: Vec3) -> Self {
        let (width, height) = kind.block_dimensions();
        let half = width * 0.5;
        let aabb = Aabb::new(
            Vec3::new(position.x - half, 0.0, position.z - half),
            Vec3::new(position.x + half, height, position.z + half),
        );
        Self {
            position: Vec3::new(position.x, 0.0, position.z),
            aabb,
            solid: true,
            kind,
        }
    }

    /// Set solidity
    pub fn with_solid(mut self, solid: bool) -> Self {
        self.solid = solid;
        self
    }

    /// Check if this collider blocks a box
    #[inline]
    pub fn blocks(&self, aabb: &Aabb) -> bool {
        self.solid && self.aabb.intersects(aabb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_dimensions() {
        let wall = StaticCollider::block(ColliderKind::Wall, Vec3::new(5.0, 3.0, 5.0));
        assert_eq!(wall.aabb.min, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(wall.aabb.max, Vec3::new(10.0, 10.0, 10.0));

        let bush = StaticCollider::block(ColliderKind::Bush, Vec3::ZERO);
        assert_eq!(bush.aabb.max.y, 5.0);

        let model = StaticCollider::block(ColliderKind::Model, Vec3::ZERO);
        assert_eq!(model.aabb.size(), Vec3::new(5.0, 500.0, 5.0));
    }

    #[test]
    fn test_non_solid_never_blocks() {
        let bush = StaticCollider::block(ColliderKind::Bush, Vec3::ZERO).with_solid(false);
        let probe = Aabb::from_center_half_extents(Vec3::new(0.0, 1.0, 0.0), Vec3::splat(1.0));
        assert!(!bush.blocks(&probe));
        assert!(bush.with_solid(true).blocks(&probe));
    }
}
