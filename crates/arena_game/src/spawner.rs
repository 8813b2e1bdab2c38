//! Continuous spawn points
//!
//! Each point spawns on its own interval while the number of live enemies it
//! produced stays under the cap. A level without spawn points spawns at random
//! positions inside the arena instead.

use arena_ai::{Enemy, EnemyManager};
use arena_core::Handle;
use arena_math::Vec3;
use rand::Rng;

use crate::config::SpawnConfig;
use crate::level::SpawnPointPlacement;

/// A spawn point and its timer
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnPoint {
    /// Where enemies appear
    pub position: Vec3,
    /// Type hint; a random type when absent
    pub enemy_type: Option<String>,
    /// Simulation time of the last spawn
    pub last_spawn: f32,
}

impl SpawnPoint {
    /// Create a point that first spawns one interval after session start
    pub fn new(position: Vec3, enemy_type: Option<String>) -> Self {
        Self {
            position,
            enemy_type,
            last_spawn: 0.0,
        }
    }

    fn is_due(&self, now: f32, interval: f32) -> bool {
        now - self.last_spawn >= interval
    }
}

/// Random position within the arena bounds
pub fn arena_position<R: Rng + ?Sized>(config: &SpawnConfig, rng: &mut R) -> Vec3 {
    let extent = config.arena_half_extent;
    Vec3::new(
        rng.gen_range(-extent..=extent),
        config.spawn_height,
        rng.gen_range(-extent..=extent),
    )
}

/// Every continuous spawn point of the level
#[derive(Debug, Clone)]
pub struct PassiveSpawner {
    points: Vec<SpawnPoint>,
    /// Timer used when the level has no points
    fallback: SpawnPoint,
    /// Enemies spawned here that may still be alive
    spawned: Vec<Handle<Enemy>>,
    config: SpawnConfig,
}

impl PassiveSpawner {
    /// Create a spawner for a level's spawn points
    pub fn new(placements: &[SpawnPointPlacement], config: SpawnConfig) -> Self {
        Self {
            points: placements
                .iter()
                .map(|p| SpawnPoint::new(p.position, p.enemy_type.clone()))
                .collect(),
            fallback: SpawnPoint::new(Vec3::ZERO, None),
            spawned: Vec::new(),
            config,
        }
    }

    /// Spawn from every due point, up to the live cap
    pub fn update<R: Rng + ?Sized>(&mut self, now: f32, enemies: &mut EnemyManager, rng: &mut R) -> Vec<Handle<Enemy>> {
        let mut new_spawns = Vec::new();
        if self.config.max_passive_active == 0 {
            return new_spawns;
        }

        self.spawned.retain(|&h| enemies.is_active(h));
        let interval = self.config.interval;

        if self.points.is_empty() {
            if self.spawned.len() < self.config.max_passive_active && self.fallback.is_due(now, interval) {
                let position = arena_position(&self.config, rng);
                if let Some(handle) = Self::spawn_one(enemies, None, position, now, rng) {
                    self.spawned.push(handle);
                    new_spawns.push(handle);
                }
                self.fallback.last_spawn = now;
            }
            return new_spawns;
        }

        for point in &mut self.points {
            if self.spawned.len() >= self.config.max_passive_active {
                break;
            }
            if !point.is_due(now, interval) {
                continue;
            }
            if let Some(handle) = Self::spawn_one(enemies, point.enemy_type.as_deref(), point.position, now, rng) {
                self.spawned.push(handle);
                new_spawns.push(handle);
            }
            point.last_spawn = now;
        }
        new_spawns
    }

    fn spawn_one<R: Rng + ?Sized>(
        enemies: &mut EnemyManager,
        enemy_type: Option<&str>,
        position: Vec3,
        now: f32,
        rng: &mut R,
    ) -> Option<Handle<Enemy>> {
        match enemy_type {
            Some(type_id) => enemies.spawn(type_id, position, now),
            None => {
                let archetype = enemies.roster().random(rng)?.clone();
                Some(enemies.spawn_archetype(&archetype, position, now))
            }
        }
    }

    /// Spawn points
    pub fn points(&self) -> &[SpawnPoint] {
        &self.points
    }

    /// Live enemies from this spawner (as of the last update)
    pub fn live_count(&self) -> usize {
        self.spawned.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_ai::{EnemyConfig, EnemyRoster};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn manager() -> EnemyManager {
        EnemyManager::new(EnemyRoster::default(), EnemyConfig::default())
    }

    #[test]
    fn test_points_spawn_on_interval() {
        let placements = vec![SpawnPointPlacement {
            position: Vec3::new(10.0, 1.0, 10.0),
            enemy_type: Some("patica".to_string()),
        }];
        let mut spawner = PassiveSpawner::new(&placements, SpawnConfig::default());
        let mut enemies = manager();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(spawner.update(1.0, &mut enemies, &mut rng).is_empty());
        let first = spawner.update(2.0, &mut enemies, &mut rng);
        assert_eq!(first.len(), 1);
        assert_eq!(enemies.get(first[0]).unwrap().type_id, "patica");
        assert!(spawner.update(3.0, &mut enemies, &mut rng).is_empty());
        assert_eq!(spawner.update(4.0, &mut enemies, &mut rng).len(), 1);
    }

    #[test]
    fn test_live_cap() {
        let placements: Vec<_> = (0..4)
            .map(|i| SpawnPointPlacement {
                position: Vec3::new(i as f32 * 5.0, 1.0, 0.0),
                enemy_type: None,
            })
            .collect();
        let config = SpawnConfig {
            max_passive_active: 3,
            ..SpawnConfig::default()
        };
        let mut spawner = PassiveSpawner::new(&placements, config);
        let mut enemies = manager();
        let mut rng = StdRng::seed_from_u64(2);

        assert_eq!(spawner.update(2.0, &mut enemies, &mut rng).len(), 3);
        assert!(spawner.update(10.0, &mut enemies, &mut rng).is_empty());

        // A death frees a slot
        let victim = enemies.handles()[0];
        enemies.despawn(victim);
        assert_eq!(spawner.update(12.0, &mut enemies, &mut rng).len(), 1);
        assert_eq!(spawner.live_count(), 3);
    }

    #[test]
    fn test_fallback_without_points() {
        let config = SpawnConfig::default();
        let mut spawner = PassiveSpawner::new(&[], config);
        let mut enemies = manager();
        let mut rng = StdRng::seed_from_u64(3);

        let spawned = spawner.update(2.0, &mut enemies, &mut rng);
        assert_eq!(spawned.len(), 1);
        let position = enemies.get(spawned[0]).unwrap().position;
        assert!(position.x.abs() <= 50.0 && position.z.abs() <= 50.0);
        assert_eq!(position.y, 1.0);
    }

    #[test]
    fn test_disabled_when_cap_is_zero() {
        let config = SpawnConfig {
            max_passive_active: 0,
            ..SpawnConfig::default()
        };
        let mut spawner = PassiveSpawner::new(&[], config);
        let mut enemies = manager();
        let mut rng = StdRng::seed_from_u64(4);
        assert!(spawner.update(100.0, &mut enemies, &mut rng).is_empty());
        assert_eq!(enemies.active_count(), 0);
    }
}
