//! A single enemy and its per-tick behavior
//!
//! Each enemy runs an implicit two-state machine: `Moving` toward the player,
//! and a timed `Shooting` pose entered whenever a ranged type fires. The
//! shooting pose only changes the animation; the enemy keeps walking, takes
//! damage and can die while in it.

use arena_combat::HealthComponent;
use arena_core::Poolable;
use arena_math::{yaw_towards, Aabb, Vec3};
use arena_physics::{apply_damping_and_gravity, clamp_to_ground, CollisionWorld, MovementConfig};

use crate::archetype::{EnemyArchetype, RangedAttack};
use crate::config::EnemyConfig;

/// AI sub-state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AiState {
    /// Walking toward the player
    Moving,
    /// Showing the shooting pose until the given time
    Shooting { until: f32 },
}

/// Animation frame shown for an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationState {
    /// Standing still (blocked or freshly spawned)
    Idle,
    /// First walk frame
    WalkA,
    /// Second walk frame
    WalkB,
    /// Firing pose
    Shooting,
}

/// Shared inputs for one AI step
#[derive(Debug, Clone, Copy)]
pub struct AiContext<'a> {
    /// Step length in seconds
    pub dt: f32,
    /// Simulation time after this step
    pub now: f32,
    /// Player eye position
    pub player_position: Vec3,
    /// Level geometry
    pub world: &'a CollisionWorld,
    /// Friction and gravity
    pub movement: &'a MovementConfig,
    /// Enemy tuning
    pub config: &'a EnemyConfig,
}

/// Projectile request produced by a ranged enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotRequest {
    /// Firing point
    pub origin: Vec3,
    /// Aim point
    pub target: Vec3,
    /// Projectile speed
    pub speed: f32,
    /// Projectile damage
    pub damage: f32,
}

/// Side effects of one AI step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AiOutput {
    /// Projectile to spawn
    pub shot: Option<ShotRequest>,
    /// Contact damage dealt to the player
    pub contact_damage: Option<f32>,
    /// Whether the tentative move was discarded
    pub blocked: bool,
}

/// A pooled enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    /// Type identifier
    pub type_id: String,
    /// Center position
    pub position: Vec3,
    /// Velocity (horizontal damped, vertical from gravity)
    pub velocity: Vec3,
    /// Health
    pub health: HealthComponent,
    /// Walk speed
    pub speed: f32,
    /// Damage per contact hit
    pub contact_damage: f32,
    /// Movement box half extents
    pub half_extents: Vec3,
    /// Hitscan box half extents
    pub hit_half_extents: Vec3,
    /// Ranged attack, if this type shoots
    pub ranged: Option<RangedAttack>,
    /// AI sub-state
    pub state: AiState,
    /// Current animation frame
    pub animation: AnimationState,
    /// Facing angle about +Y
    pub yaw: f32,
    /// Showing the hit flash tint
    pub hit_flash: bool,
    /// Whether the enemy is in the world (false while pooled)
    pub visible: bool,
    /// Time of the last contact hit
    pub last_melee: Option<f32>,
    /// Time of the last shot (spawn time before the first)
    pub last_shot: f32,
    walk_clock: f32,
}

impl Enemy {
    /// Place a freshly acquired enemy in the world
    pub fn place(&mut self, position: Vec3, now: f32) {
        self.position = position;
        self.last_shot = now;
        self.visible = true;
    }

    /// Movement box at an arbitrary center
    pub fn collision_box_at(&self, center: Vec3) -> Aabb {
        Aabb::from_center_half_extents(center, self.half_extents)
    }

    /// Movement box at the current position
    pub fn collision_box(&self) -> Aabb {
        self.collision_box_at(self.position)
    }

    /// Hitscan target box
    pub fn hit_box(&self) -> Aabb {
        Aabb::from_center_half_extents(self.position, self.hit_half_extents)
    }

    /// Check if this enemy fires projectiles
    pub fn is_ranged(&self) -> bool {
        self.ranged.is_some()
    }

    /// Advance this enemy by one step
    pub fn think(&mut self, ctx: &AiContext<'_>) -> AiOutput {
        let mut output = AiOutput::default();
        let cfg = ctx.config;

        apply_damping_and_gravity(&mut self.velocity, ctx.movement, ctx.dt);
        self.yaw = yaw_towards(self.position, ctx.player_position);

        if let AiState::Shooting { until } = self.state {
            if ctx.now >= until {
                self.state = AiState::Moving;
            }
        }

        if let Some(attack) = self.ranged {
            if ctx.now - self.last_shot >= attack.interval {
                self.last_shot = ctx.now;
                self.state = AiState::Shooting {
                    until: ctx.now + cfg.shoot_duration,
                };
                output.shot = Some(ShotRequest {
                    origin: self.position,
                    target: ctx.player_position - Vec3::new(0.0, cfg.aim_drop, 0.0),
                    speed: attack.projectile_speed,
                    damage: attack.projectile_damage,
                });
            }
        }

        let to_player = ctx.player_position - self.position;
        let direction = Vec3::new(to_player.x, 0.0, to_player.z).normalize_or_zero();
        let mut tentative = self.position + direction * self.speed * ctx.dt;
        tentative.y += self.velocity.y * ctx.dt;
        clamp_to_ground(&mut tentative, &mut self.velocity, cfg.ground_height);

        if ctx.world.intersects(&self.collision_box_at(tentative)) {
            output.blocked = true;
        } else {
            self.position = tentative;
        }

        clamp_to_ground(&mut self.position, &mut self.velocity, cfg.ground_height);

        let walking = !output.blocked && direction != Vec3::ZERO;
        self.advance_animation(walking, ctx.dt, cfg.walk_frame_time);

        let cooled = self
            .last_melee
            .map_or(true, |last| ctx.now - last >= cfg.melee_cooldown);
        if cooled && self.position.distance(ctx.player_position) < cfg.melee_range {
            self.last_melee = Some(ctx.now);
            output.contact_damage = Some(self.contact_damage);
        }

        output
    }

    fn advance_animation(&mut self, walking: bool, dt: f32, frame_time: f32) {
        if matches!(self.state, AiState::Shooting { .. }) {
            self.animation = AnimationState::Shooting;
            return;
        }
        if !walking {
            self.animation = AnimationState::Idle;
            return;
        }

        self.walk_clock += dt;
        let frame = (self.walk_clock / frame_time.max(f32::EPSILON)) as u32;
        self.animation = if frame % 2 == 0 {
            AnimationState::WalkA
        } else {
            AnimationState::WalkB
        };
    }
}

impl Poolable for Enemy {
    type Spec = EnemyArchetype;

    fn create(spec: &EnemyArchetype) -> Self {
        Self {
            type_id: spec.id.clone(),
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            health: HealthComponent::new(spec.max_health),
            speed: spec.speed,
            contact_damage: spec.contact_damage,
            half_extents: spec.half_extents,
            hit_half_extents: spec.hit_half_extents,
            ranged: spec.ranged,
            state: AiState::Moving,
            animation: AnimationState::Idle,
            yaw: 0.0,
            hit_flash: false,
            visible: true,
            last_melee: None,
            last_shot: 0.0,
            walk_clock: 0.0,
        }
    }

    fn reset(&mut self, spec: &EnemyArchetype) {
        self.type_id.clone_from(&spec.id);
        self.velocity = Vec3::ZERO;
        self.health.reset(spec.max_health);
        self.speed = spec.speed;
        self.contact_damage = spec.contact_damage;
        self.half_extents = spec.half_extents;
        self.hit_half_extents = spec.hit_half_extents;
        self.ranged = spec.ranged;
        self.state = AiState::Moving;
        self.animation = AnimationState::Idle;
        self.hit_flash = false;
        self.visible = true;
        self.last_melee = None;
        self.last_shot = 0.0;
        self.walk_clock = 0.0;
    }

    fn deactivate(&mut self) {
        self.visible = false;
        self.hit_flash = false;
        self.velocity = Vec3::ZERO;
    }
}
