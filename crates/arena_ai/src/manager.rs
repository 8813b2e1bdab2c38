//! Pooled enemy management
//!
//! Owns the enemy pool and runs the AI for every active enemy. Removal of an
//! enemy, whether by lethal damage or a forced despawn, always goes through
//! the pool, so an enemy is released exactly once and every handle to it goes
//! stale at that moment.

use arena_combat::ProjectileSystem;
use arena_core::{EntityPool, Handle, PoolStats};
use arena_math::{Ray, Vec3};

use crate::archetype::{EnemyArchetype, EnemyRoster};
use crate::config::EnemyConfig;
use crate::enemy::{AiContext, Enemy};

/// Result of damaging an enemy
#[derive(Debug, Clone, PartialEq)]
pub enum DamageOutcome {
    /// The handle no longer names an active enemy
    Ignored,
    /// The enemy survived
    Hurt {
        /// Health left
        remaining: f32,
    },
    /// The enemy died and went back to the pool
    Killed {
        /// Where it died
        position: Vec3,
        /// Its type
        type_id: String,
    },
}

/// Contact hit on the player from one enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactHit {
    /// The attacker
    pub enemy: Handle<Enemy>,
    /// Damage dealt
    pub damage: f32,
}

/// Side effects of one enemy update pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnemyUpdateReport {
    /// Contact hits on the player, in update order
    pub contact_hits: Vec<ContactHit>,
    /// Projectiles fired this pass
    pub shots_fired: usize,
}

/// Nearest enemy hit by a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyRayHit {
    /// The enemy
    pub enemy: Handle<Enemy>,
    /// Distance along the ray
    pub distance: f32,
    /// Impact point
    pub point: Vec3,
}

/// Owner of every enemy, active or pooled
pub struct EnemyManager {
    pool: EntityPool<Enemy>,
    roster: EnemyRoster,
    config: EnemyConfig,
}

impl EnemyManager {
    /// Create a manager for a roster
    pub fn new(roster: EnemyRoster, config: EnemyConfig) -> Self {
        Self {
            pool: EntityPool::new(config.pool_capacity),
            roster,
            config,
        }
    }

    /// Spawn an enemy of a named type.
    ///
    /// Unknown types are logged and skipped.
    pub fn spawn(&mut self, type_id: &str, position: Vec3, now: f32) -> Option<Handle<Enemy>> {
        let Some(archetype) = self.roster.get(type_id) else {
            log::warn!("Unknown enemy type '{}', spawn skipped", type_id);
            return None;
        };
        let archetype = archetype.clone();
        Some(self.spawn_archetype(&archetype, position, now))
    }

    /// Spawn an enemy from explicit stats
    pub fn spawn_archetype(&mut self, archetype: &EnemyArchetype, position: Vec3, now: f32) -> Handle<Enemy> {
        let handle = self.pool.acquire(archetype);
        if let Some(enemy) = self.pool.get_mut(handle) {
            enemy.place(position, now);
        }
        log::debug!(
            "Spawned {} {:?} at ({:.1}, {:.1}, {:.1})",
            archetype.id,
            handle,
            position.x,
            position.y,
            position.z
        );
        handle
    }

    /// Run one AI step for every active enemy.
    ///
    /// Iterates over a handle snapshot; shots go straight into `projectiles`.
    pub fn update(&mut self, ctx: &AiContext<'_>, projectiles: &mut ProjectileSystem) -> EnemyUpdateReport {
        let mut report = EnemyUpdateReport::default();

        for handle in self.pool.active_handles() {
            let Some(enemy) = self.pool.get_mut(handle) else {
                continue;
            };
            let output = enemy.think(ctx);

            if let Some(shot) = output.shot {
                projectiles.spawn(shot.origin, shot.target, shot.speed, shot.damage);
                report.shots_fired += 1;
            }
            if let Some(damage) = output.contact_damage {
                report.contact_hits.push(ContactHit { enemy: handle, damage });
            }
        }

        report
    }

    /// Apply damage to an enemy; lethal damage releases it to the pool
    pub fn damage(&mut self, handle: Handle<Enemy>, amount: f32) -> DamageOutcome {
        let Some(enemy) = self.pool.get_mut(handle) else {
            return DamageOutcome::Ignored;
        };

        let (_, died) = enemy.health.apply_damage(amount);
        if !died {
            return DamageOutcome::Hurt {
                remaining: enemy.health.current,
            };
        }

        let position = enemy.position;
        let type_id = enemy.type_id.clone();
        if let Err(err) = self.pool.release(handle) {
            log::warn!("Failed to release dead enemy: {}", err);
            return DamageOutcome::Ignored;
        }
        log::debug!("Enemy {} {:?} killed", type_id, handle);
        DamageOutcome::Killed { position, type_id }
    }

    /// Remove an enemy without killing it
    pub fn despawn(&mut self, handle: Handle<Enemy>) -> bool {
        match self.pool.release(handle) {
            Ok(()) => {
                log::debug!("Despawned {:?}", handle);
                true
            }
            Err(_) => false,
        }
    }

    /// Remove every active enemy
    pub fn despawn_all(&mut self) -> usize {
        let handles = self.pool.active_handles();
        handles.into_iter().filter(|&h| self.despawn(h)).count()
    }

    /// Nearest visible enemy whose hit box the ray crosses within `max_distance`
    pub fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<EnemyRayHit> {
        self.pool
            .iter_active()
            .filter(|(_, enemy)| enemy.visible)
            .filter_map(|(handle, enemy)| {
                let distance = ray.intersect_aabb(&enemy.hit_box())?;
                (distance <= max_distance).then(|| EnemyRayHit {
                    enemy: handle,
                    distance,
                    point: ray.at(distance),
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    /// Turn the hit flash on or off; false if the handle is stale
    pub fn set_hit_flash(&mut self, handle: Handle<Enemy>, on: bool) -> bool {
        match self.pool.get_mut(handle) {
            Some(enemy) => {
                enemy.hit_flash = on;
                true
            }
            None => false,
        }
    }

    /// Drop retained instances down to `keep` if nothing is active
    pub fn cleanup_pool(&mut self, keep: usize) -> usize {
        if self.pool.active_count() > 0 || self.pool.retained_count() <= keep {
            return 0;
        }
        self.pool.trim_retained(keep)
    }

    /// Drop everything (level change)
    pub fn clear(&mut self) {
        self.pool.clear();
    }

    /// Get an active enemy
    pub fn get(&self, handle: Handle<Enemy>) -> Option<&Enemy> {
        self.pool.get(handle)
    }

    /// Get an active enemy mutably
    pub fn get_mut(&mut self, handle: Handle<Enemy>) -> Option<&mut Enemy> {
        self.pool.get_mut(handle)
    }

    /// Check if a handle names an active enemy
    pub fn is_active(&self, handle: Handle<Enemy>) -> bool {
        self.pool.is_active(handle)
    }

    /// Iterate over active enemies
    pub fn iter(&self) -> impl Iterator<Item = (Handle<Enemy>, &Enemy)> {
        self.pool.iter_active()
    }

    /// Snapshot of active handles
    pub fn handles(&self) -> Vec<Handle<Enemy>> {
        self.pool.active_handles()
    }

    /// Number of active enemies
    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    /// Number of pooled enemies waiting for reuse
    pub fn retained_count(&self) -> usize {
        self.pool.retained_count()
    }

    /// Pool counters
    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// Known enemy types
    pub fn roster(&self) -> &EnemyRoster {
        &self.roster
    }

    /// Enemy tuning
    pub fn config(&self) -> &EnemyConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_combat::ProjectileConfig;
    use arena_physics::{CollisionWorld, MovementConfig};

    fn manager() -> EnemyManager {
        EnemyManager::new(EnemyRoster::default(), EnemyConfig::default())
    }

    #[test]
    fn test_unknown_type_is_skipped() {
        let mut enemies = manager();
        assert!(enemies.spawn("dragon", Vec3::ZERO, 0.0).is_none());
        assert_eq!(enemies.active_count(), 0);
    }

    #[test]
    fn test_non_lethal_hits_accumulate() {
        let mut enemies = manager();
        let h = enemies.spawn("pablo", Vec3::new(0.0, 1.0, 0.0), 0.0).unwrap();

        for n in 1..=5 {
            assert_eq!(
                enemies.damage(h, 25.0),
                DamageOutcome::Hurt { remaining: 150.0 - 25.0 * n as f32 }
            );
        }
        assert!(matches!(enemies.damage(h, 25.0), DamageOutcome::Killed { .. }));
        assert_eq!(enemies.damage(h, 25.0), DamageOutcome::Ignored);
        assert_eq!(enemies.active_count(), 0);
        assert_eq!(enemies.pool_stats().released, 1);
    }

    #[test]
    fn test_reacquire_gets_base_stats() {
        let mut enemies = manager();
        let first = enemies.spawn("pablo", Vec3::new(5.0, 1.0, 5.0), 0.0).unwrap();
        enemies.get_mut(first).unwrap().velocity = Vec3::new(3.0, 0.0, 3.0);
        enemies.damage(first, 40.0);
        assert!(enemies.despawn(first));

        let second = enemies.spawn("pablo", Vec3::new(0.0, 1.0, 0.0), 1.0).unwrap();
        let enemy = enemies.get(second).unwrap();
        assert_eq!(enemy.health.current, 150.0);
        assert_eq!(enemy.velocity, Vec3::ZERO);
        assert_eq!(enemies.pool_stats().reused, 1);
        assert!(!enemies.set_hit_flash(first, true));
    }

    #[test]
    fn test_raycast_picks_nearest() {
        let mut enemies = manager();
        let far = enemies.spawn("pablo", Vec3::new(0.0, 1.0, -20.0), 0.0).unwrap();
        let near = enemies.spawn("pera", Vec3::new(0.0, 1.0, -10.0), 0.0).unwrap();
        let ray = Ray::new(Vec3::new(0.0, 1.5, 0.0), Vec3::new(0.0, 0.0, -1.0));

        let hit = enemies.raycast(&ray, 1000.0).unwrap();
        assert_eq!(hit.enemy, near);

        enemies.despawn(near);
        assert_eq!(enemies.raycast(&ray, 1000.0).unwrap().enemy, far);
        assert!(enemies.raycast(&ray, 5.0).is_none());
    }

    #[test]
    fn test_update_reports_contact_and_shots() {
        let mut enemies = manager();
        let world = CollisionWorld::new();
        let movement = MovementConfig::default();
        let config = EnemyConfig::default();
        let mut projectiles = ProjectileSystem::new(ProjectileConfig::default());

        let biter = enemies.spawn("pablo", Vec3::new(0.0, 1.0, -1.0), 0.0).unwrap();
        enemies.spawn("pera", Vec3::new(0.0, 1.0, -30.0), 0.0).unwrap();

        let ctx = AiContext {
            dt: 0.016,
            now: 3.0,
            player_position: Vec3::new(0.0, 2.0, 0.0),
            world: &world,
            movement: &movement,
            config: &config,
        };
        let report = enemies.update(&ctx, &mut projectiles);

        assert_eq!(report.contact_hits, vec![ContactHit { enemy: biter, damage: 10.0 }]);
        assert_eq!(report.shots_fired, 1);
        assert_eq!(projectiles.len(), 1);
    }

    #[test]
    fn test_cleanup_only_when_idle() {
        let mut enemies = manager();
        let handles: Vec<_> = (0..8)
            .filter_map(|_| enemies.spawn("patica", Vec3::ZERO, 0.0))
            .collect();
        let keeper = enemies.spawn("patica", Vec3::ZERO, 0.0).unwrap();
        for h in handles {
            enemies.despawn(h);
        }

        assert_eq!(enemies.cleanup_pool(5), 0);
        enemies.despawn(keeper);
        assert_eq!(enemies.retained_count(), 9);
        assert_eq!(enemies.cleanup_pool(5), 4);
        assert_eq!(enemies.retained_count(), 5);
    }
}
