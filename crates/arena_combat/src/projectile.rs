//! Enemy projectiles

use arena_math::{Aabb, Vec3};
use arena_physics::CollisionWorld;
use serde::{Deserialize, Serialize};

/// Projectile tuning shared by every ranged enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Bounding sphere radius
    pub radius: f32,
    /// Removal distance from the firing point
    pub max_distance: f32,
    /// Projectiles below this height are removed
    pub floor_height: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            radius: 0.2,
            max_distance: 100.0,
            floor_height: 0.0,
        }
    }
}

/// A ballistic projectile in flight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    /// Current center
    pub position: Vec3,
    /// Velocity in units per second
    pub velocity: Vec3,
    /// Bounding sphere radius
    pub radius: f32,
    /// Damage dealt to the player on impact
    pub damage: f32,
    /// Where it was fired from
    pub origin: Vec3,
    /// Seconds until it expires on its own
    pub lifetime: f32,
    /// Removal distance from `origin`
    pub max_distance: f32,
}

impl Projectile {
    /// Distance travelled from the firing point
    pub fn travelled(&self) -> f32 {
        self.position.distance(self.origin)
    }

    /// Bounding box of the sphere
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_half_extents(self.position, Vec3::splat(self.radius))
    }
}

/// What happened to projectiles during one update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectileReport {
    /// Damage amounts of projectiles that hit the player, in order
    pub player_hits: Vec<f32>,
    /// Projectiles stopped by level geometry
    pub wall_impacts: usize,
    /// Projectiles removed by floor, range or lifetime
    pub expired: usize,
}

impl ProjectileReport {
    /// Total damage the player took
    pub fn total_damage(&self) -> f32 {
        self.player_hits.iter().sum()
    }
}

/// Owner of every projectile in flight
#[derive(Debug, Clone, Default)]
pub struct ProjectileSystem {
    config: ProjectileConfig,
    projectiles: Vec<Projectile>,
}

impl ProjectileSystem {
    /// Create an empty system
    pub fn new(config: ProjectileConfig) -> Self {
        Self {
            config,
            projectiles: Vec::new(),
        }
    }

    /// Fire a projectile from `origin` toward `target`.
    ///
    /// Its lifetime is the time it takes to cover the configured range, so
    /// it is gone within `max_distance / speed` even if it hits nothing.
    pub fn spawn(&mut self, origin: Vec3, target: Vec3, speed: f32, damage: f32) {
        let direction = (target - origin).normalize_or_zero();
        if direction == Vec3::ZERO || speed <= 0.0 {
            log::debug!("Projectile with no direction or speed dropped");
            return;
        }

        self.projectiles.push(Projectile {
            position: origin,
            velocity: direction * speed,
            radius: self.config.radius,
            damage,
            origin,
            lifetime: self.config.max_distance / speed,
            max_distance: self.config.max_distance,
        });
    }

    /// Advance every projectile and resolve impacts.
    ///
    /// The player is tested before level geometry, so a projectile touching
    /// both damages the player.
    pub fn update(&mut self, dt: f32, player_box: &Aabb, world: &CollisionWorld) -> ProjectileReport {
        let mut report = ProjectileReport::default();
        let floor = self.config.floor_height;

        self.projectiles.retain_mut(|p| {
            p.position += p.velocity * dt;
            p.lifetime -= dt;

            if player_box.intersects_sphere(p.position, p.radius) {
                report.player_hits.push(p.damage);
                return false;
            }
            if world.intersects(&p.bounds()) {
                report.wall_impacts += 1;
                return false;
            }
            if p.position.y < floor || p.travelled() > p.max_distance || p.lifetime <= 0.0 {
                report.expired += 1;
                return false;
            }
            true
        });

        report
    }

    /// Projectiles in flight
    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Number in flight
    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    /// Check if nothing is in flight
    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    /// Remove every projectile
    pub fn clear(&mut self) {
        self.projectiles.clear();
    }
}
