//! Enemy types and the roster they are looked up in

use arena_math::Vec3;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Ranged attack parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangedAttack {
    /// Seconds between shots
    pub interval: f32,
    /// Projectile speed
    pub projectile_speed: f32,
    /// Damage per projectile
    pub projectile_damage: f32,
}

/// Base stats for one enemy type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyArchetype {
    /// Type identifier used by waves, triggers and spawn points
    pub id: String,
    /// Health on spawn
    pub max_health: f32,
    /// Walk speed in units per second
    pub speed: f32,
    /// Damage per melee contact
    pub contact_damage: f32,
    /// Movement collision box half extents
    #[serde(default = "default_collision_half_extents")]
    pub half_extents: Vec3,
    /// Hitscan target box half extents
    #[serde(default = "default_hit_half_extents")]
    pub hit_half_extents: Vec3,
    /// Present for types that shoot
    #[serde(default)]
    pub ranged: Option<RangedAttack>,
}

fn default_collision_half_extents() -> Vec3 {
    Vec3::new(0.3, 1.0, 0.3)
}

fn default_hit_half_extents() -> Vec3 {
    Vec3::new(1.0, 1.0, 1.0)
}

impl EnemyArchetype {
    /// Create a melee type with default boxes
    pub fn melee(id: impl Into<String>, max_health: f32, speed: f32, contact_damage: f32) -> Self {
        Self {
            id: id.into(),
            max_health,
            speed,
            contact_damage,
            half_extents: default_collision_half_extents(),
            hit_half_extents: default_hit_half_extents(),
            ranged: None,
        }
    }

    /// Add a ranged attack
    pub fn with_ranged(mut self, interval: f32, projectile_speed: f32, projectile_damage: f32) -> Self {
        self.ranged = Some(RangedAttack {
            interval,
            projectile_speed,
            projectile_damage,
        });
        self
    }

    /// Check if this type shoots
    pub fn is_ranged(&self) -> bool {
        self.ranged.is_some()
    }
}

/// Every enemy type known to a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnemyRoster {
    archetypes: Vec<EnemyArchetype>,
}

impl EnemyRoster {
    /// Create a roster from a list of types
    pub fn new(archetypes: Vec<EnemyArchetype>) -> Self {
        Self { archetypes }
    }

    /// Look up a type by id
    pub fn get(&self, id: &str) -> Option<&EnemyArchetype> {
        self.archetypes.iter().find(|a| a.id == id)
    }

    /// Pick a uniformly random type
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&EnemyArchetype> {
        self.archetypes.choose(rng)
    }

    /// Type ids in roster order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.archetypes.iter().map(|a| a.id.as_str())
    }

    /// Number of types
    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    /// Check if the roster has no types
    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }
}

impl Default for EnemyRoster {
    fn default() -> Self {
        Self::new(vec![
            EnemyArchetype::melee("pablo", 150.0, 5.0, 10.0),
            EnemyArchetype::melee("pera", 100.0, 4.0, 8.0).with_ranged(2.5, 30.0, 10.0),
            EnemyArchetype::melee("patica", 80.0, 8.0, 5.0),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_roster() {
        let roster = EnemyRoster::default();
        assert_eq!(roster.ids().collect::<Vec<_>>(), vec!["pablo", "pera", "patica"]);

        let pablo = roster.get("pablo").unwrap();
        assert_eq!(pablo.max_health, 150.0);
        assert!(!pablo.is_ranged());
        assert!(roster.get("pera").unwrap().is_ranged());
        assert!(roster.get("nobody").is_none());
    }

    #[test]
    fn test_random_pick_is_from_roster() {
        let roster = EnemyRoster::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let picked = roster.random(&mut rng).unwrap();
            assert!(roster.get(&picked.id).is_some());
        }
        assert!(EnemyRoster::new(Vec::new()).random(&mut rng).is_none());
    }

    #[test]
    fn test_roster_deserializes_with_default_boxes() {
        let json = r#"[{"id":"grunt","max_health":40.0,"speed":3.0,"contact_damage":2.0}]"#;
        let roster: EnemyRoster = serde_json::from_str(json).unwrap();
        let grunt = roster.get("grunt").unwrap();
        assert_eq!(grunt.half_extents, Vec3::new(0.3, 1.0, 0.3));
        assert!(grunt.ranged.is_none());
    }
}
