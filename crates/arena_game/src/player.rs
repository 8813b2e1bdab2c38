//! The player: locomotion, vitals and weapons
//!
//! Movement runs friction and gravity, input acceleration, a tentative step,
//! the ground clamp, then collide-and-slide against solid geometry and closed
//! doors. Once the player is dead every entry point is a no-op.

use arena_ai::{DamageOutcome, Enemy, EnemyManager};
use arena_combat::{FireResult, HealthComponent, WeaponSet, WeaponStats};
use arena_core::Handle;
use arena_math::{consts::PI, look_direction, yaw_forward, yaw_right, Aabb, Ray, Vec3};
use arena_physics::{apply_damping_and_gravity, clamp_to_ground, collide_and_slide, CollisionWorld, MovementConfig, SlideOutcome};

use crate::config::PlayerConfig;
use crate::door::DoorRegistry;

/// Input for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    /// Move forward
    pub forward: bool,
    /// Move backward
    pub backward: bool,
    /// Strafe left
    pub left: bool,
    /// Strafe right
    pub right: bool,
    /// Jump (ignored unless grounded)
    pub jump: bool,
    /// Trigger held
    pub fire: bool,
    /// Interact (open doors)
    pub interact: bool,
    /// Cycle weapons: positive forward, negative back, zero none
    pub switch_weapon: i32,
    /// Select a weapon slot directly
    pub select_weapon: Option<usize>,
    /// Yaw change in radians
    pub yaw_delta: f32,
    /// Pitch change in radians
    pub pitch_delta: f32,
}

impl PlayerInput {
    /// Input with nothing pressed
    pub fn idle() -> Self {
        Self::default()
    }

    /// Walk forward
    pub fn forward() -> Self {
        Self {
            forward: true,
            ..Self::default()
        }
    }

    /// Hold the trigger
    pub fn with_fire(mut self) -> Self {
        self.fire = true;
        self
    }

    /// Press interact
    pub fn with_interact(mut self) -> Self {
        self.interact = true;
        self
    }

    /// Press jump
    pub fn with_jump(mut self) -> Self {
        self.jump = true;
        self
    }

    /// Select a weapon slot
    pub fn with_select(mut self, index: usize) -> Self {
        self.select_weapon = Some(index);
        self
    }

    /// Horizontal move direction in player space (x right, z forward), normalized
    fn move_axes(&self) -> Option<(f32, f32)> {
        let z = self.forward as i32 - self.backward as i32;
        let x = self.right as i32 - self.left as i32;
        if x == 0 && z == 0 {
            return None;
        }
        let (x, z) = (x as f32, z as f32);
        let length = (x * x + z * z).sqrt();
        Some((x / length, z / length))
    }
}

/// Result of damaging the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerDamage {
    /// Already dead, nothing happened
    Ignored,
    /// Survived with this much health
    Hurt { health: f32 },
    /// This hit was lethal
    Died,
}

/// Result of one hitscan shot
#[derive(Debug, Clone, PartialEq)]
pub struct ShotOutcome {
    /// Slot that fired
    pub weapon_index: usize,
    /// Ammo left in that slot (`None` = infinite)
    pub ammo_left: Option<u32>,
    /// Sound for the shot
    pub sound: String,
    /// Enemy struck, and what happened to it
    pub hit: Option<(Handle<Enemy>, DamageOutcome)>,
}

/// The session's player
#[derive(Debug, Clone)]
pub struct Player {
    /// Eye position
    pub position: Vec3,
    /// Velocity
    pub velocity: Vec3,
    /// Rotation about +Y; 0 looks down -Z
    pub yaw: f32,
    /// Look pitch, clamped to straight up/down
    pub pitch: f32,
    /// Health
    pub health: HealthComponent,
    /// Loadout and ammo
    pub weapons: WeaponSet,
    /// Kills
    pub score: u32,
    /// Standing on the floor
    pub grounded: bool,
    /// Dead; input is ignored from here on
    pub game_over: bool,
    /// Current weapon kick
    pub recoil: f32,
    config: PlayerConfig,
}

impl Player {
    /// Create a player at `spawn`
    pub fn new(config: PlayerConfig, loadout: Vec<WeaponStats>, spawn: Vec3) -> Self {
        Self {
            position: spawn,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            health: HealthComponent::new(config.max_health),
            weapons: WeaponSet::new(loadout),
            score: 0,
            grounded: false,
            game_over: false,
            recoil: 0.0,
            config,
        }
    }

    /// Move to a position and stop
    pub fn teleport(&mut self, position: Vec3) {
        self.position = position;
        self.velocity = Vec3::ZERO;
    }

    /// Collision box around the eye
    pub fn collision_box(&self) -> Aabb {
        Aabb::from_center_half_extents(self.position, self.config.half_extents)
    }

    /// Apply look input
    pub fn look(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(-PI * 0.5, PI * 0.5);
    }

    /// Integrate one movement step
    pub fn update_movement(
        &mut self,
        dt: f32,
        input: &PlayerInput,
        movement: &MovementConfig,
        world: &CollisionWorld,
        doors: &DoorRegistry,
    ) -> SlideOutcome {
        if self.game_over {
            return SlideOutcome::Clear;
        }

        apply_damping_and_gravity(&mut self.velocity, movement, dt);

        if let Some((x, z)) = input.move_axes() {
            let direction = yaw_forward(self.yaw) * z + yaw_right(self.yaw) * x;
            self.velocity += direction * self.config.speed * dt;
        }

        let old = self.position;
        let mut tentative = old + self.velocity * dt;
        if clamp_to_ground(&mut tentative, &mut self.velocity, self.config.eye_height) {
            self.grounded = true;
        }

        let slide = collide_and_slide(old, tentative, self.config.half_extents, |aabb| {
            world.intersects(aabb) || doors.blocks(aabb)
        });
        slide.apply_to_velocity(&mut self.velocity);
        self.position = slide.position;

        if input.jump && self.grounded {
            self.velocity.y += self.config.jump_velocity;
            self.grounded = false;
        }

        slide.outcome
    }

    /// Take damage; the first lethal hit ends the game
    pub fn take_damage(&mut self, amount: f32) -> PlayerDamage {
        if self.game_over {
            return PlayerDamage::Ignored;
        }
        let (_, died) = self.health.apply_damage(amount);
        if died {
            self.game_over = true;
            self.velocity = Vec3::ZERO;
            PlayerDamage::Died
        } else {
            PlayerDamage::Hurt {
                health: self.health.current,
            }
        }
    }

    /// Heal; returns the new health, or `None` once dead
    pub fn heal(&mut self, amount: f32) -> Option<f32> {
        if self.game_over {
            return None;
        }
        self.health.heal(amount);
        Some(self.health.current)
    }

    /// Add ammo to a weapon slot; returns the new count for finite-ammo slots
    pub fn add_ammo(&mut self, weapon_index: usize, amount: u32) -> Option<u32> {
        if self.game_over {
            return None;
        }
        self.weapons.add_ammo(weapon_index, amount)
    }

    /// Cycle weapons; returns the newly active weapon
    pub fn switch_weapon(&mut self, direction: i32) -> Option<&WeaponStats> {
        if self.game_over || direction == 0 {
            return None;
        }
        Some(self.weapons.switch(direction))
    }

    /// Select a weapon slot; returns the newly active weapon
    pub fn select_weapon(&mut self, index: usize) -> Option<&WeaponStats> {
        if self.game_over || !self.weapons.select(index) {
            return None;
        }
        Some(self.weapons.active())
    }

    /// Eye ray along the look direction
    pub fn aim_ray(&self) -> Ray {
        Ray::new(self.position, look_direction(self.yaw, self.pitch))
    }

    /// Pull the trigger at time `now`.
    ///
    /// A shot that goes out casts a ray against visible enemies and damages
    /// the nearest one. Returns `None` when nothing fired.
    pub fn fire(&mut self, now: f32, enemies: &mut EnemyManager) -> Option<ShotOutcome> {
        if self.game_over {
            return None;
        }
        let FireResult::Fired { damage, range, ammo_left } = self.weapons.try_fire(now) else {
            return None;
        };

        let hit = enemies
            .raycast(&self.aim_ray(), range)
            .map(|hit| (hit.enemy, enemies.damage(hit.enemy, damage)));

        Some(ShotOutcome {
            weapon_index: self.weapons.active_index(),
            ammo_left,
            sound: self.weapons.active().sound.clone(),
            hit,
        })
    }

    /// Tuning this player was built with
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }
}
