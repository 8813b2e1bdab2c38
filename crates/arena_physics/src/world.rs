//! Collision world holding the static level geometry

use crate::collider::{ColliderKind, StaticCollider};
use arena_math::Aabb;

/// Immutable set of static colliders for one level.
///
/// Queries are linear scans over the collider list.
#[derive(Debug, Clone, Default)]
pub struct CollisionWorld {
    colliders: Vec<StaticCollider>,
}

impl CollisionWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a world from a list of colliders
    pub fn from_colliders(colliders: Vec<StaticCollider>) -> Self {
        log::debug!("Collision world built with {} colliders", colliders.len());
        Self { colliders }
    }

    /// Replace all geometry (level reload)
    pub fn reload(&mut self, colliders: Vec<StaticCollider>) {
        log::debug!(
            "Collision world reloaded: {} -> {} colliders",
            self.colliders.len(),
            colliders.len()
        );
        self.colliders = colliders;
    }

    /// Check if a box overlaps any solid collider
    pub fn intersects(&self, aabb: &Aabb) -> bool {
        self.colliders.iter().any(|c| c.blocks(aabb))
    }

    /// All colliders (solid or not) overlapping a region
    pub fn colliders_near(&self, region: &Aabb) -> Vec<&StaticCollider> {
        self.colliders
            .iter()
            .filter(|c| c.aabb.intersects(region))
            .collect()
    }

    /// Iterate over every collider
    pub fn iter(&self) -> impl Iterator<Item = &StaticCollider> {
        self.colliders.iter()
    }

    /// Number of colliders of one kind
    pub fn count_of(&self, kind: ColliderKind) -> usize {
        self.colliders.iter().filter(|c| c.kind == kind).count()
    }

    /// Total collider count
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Check if the world has no geometry
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_math::Vec3;

    fn sample_world() -> CollisionWorld {
        CollisionWorld::from_colliders(vec![
            StaticCollider::block(ColliderKind::Wall, Vec3::new(20.0, 0.0, 0.0)),
            StaticCollider::block(ColliderKind::Bush, Vec3::new(-20.0, 0.0, 0.0)).with_solid(false),
        ])
    }

    #[test]
    fn test_intersects_solid_only() {
        let world = sample_world();
        let near_wall = Aabb::from_center_half_extents(Vec3::new(15.5, 2.0, 0.0), Vec3::splat(1.0));
        let in_bush = Aabb::from_center_half_extents(Vec3::new(-20.0, 2.0, 0.0), Vec3::splat(1.0));
        let open = Aabb::from_center_half_extents(Vec3::new(0.0, 2.0, 0.0), Vec3::splat(1.0));

        assert!(world.intersects(&near_wall));
        assert!(!world.intersects(&in_bush));
        assert!(!world.intersects(&open));
    }

    #[test]
    fn test_colliders_near_includes_non_solid() {
        let world = sample_world();
        let region = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::new(30.0, 10.0, 30.0));
        assert_eq!(world.colliders_near(&region).len(), 2);
        assert_eq!(world.count_of(ColliderKind::Wall), 1);
    }

    #[test]
    fn test_reload_replaces_geometry() {
        let mut world = sample_world();
        world.reload(Vec::new());
        assert!(world.is_empty());
    }
}
