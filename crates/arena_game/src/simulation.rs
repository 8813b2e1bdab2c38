//! The session simulation
//!
//! [`Simulation`] owns every subsystem of one arena session and advances them
//! in a fixed order each [`tick`](Simulation::tick):
//!
//! 1. deferred actions due by the new time
//! 2. player look, weapons, movement, interaction and firing
//! 3. event triggers
//! 4. the wave director
//! 5. continuous spawn points
//! 6. enemy AI, then enemy projectiles
//! 7. doors
//! 8. pickups
//! 9. periodic pool cleanup
//!
//! Once the player dies only step 1 runs. Presentation, UI and audio are
//! outputs: the UI and audio sinks receive events as they happen and
//! [`Simulation::snapshot`] describes the frame afterwards.

use std::path::Path;

use arena_ai::{AiContext, DamageOutcome, Enemy, EnemyManager};
use arena_audio::{ids, AudioLog, AudioSink, NullAudio, SoundSettings, SpatialSettings};
use arena_combat::ProjectileSystem;
use arena_core::{DeferredQueue, Handle};
use arena_hud::{HudState, NullUi, UiSink};
use arena_math::Vec3;
use arena_physics::CollisionWorld;
use arena_triggers::{ring_positions, TriggerAction, TriggerSystem};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SimConfig;
use crate::door::DoorRegistry;
use crate::error::Result;
use crate::level::{load_or_default, LevelData, LevelProvider};
use crate::pickups::{PickupEffect, PickupField};
use crate::player::{Player, PlayerDamage, PlayerInput, ShotOutcome};
use crate::present::{DoorView, EnemyView, FrameSnapshot, PickupView, PlayerView, Presenter, SpriteTable};
use crate::spawner::PassiveSpawner;
use crate::state::{SessionState, SessionStateMachine};
use crate::wave::{WaveCommand, WaveDirector};

/// Work scheduled for a later tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeferredAction {
    /// Clear an enemy's hit flash; a no-op if the handle went stale
    RevertHitFlash { enemy: Handle<Enemy> },
    /// Reset the weapon kick
    EndRecoil,
    /// Clear the world tint unless a newer flash replaced it
    RestoreTint { generation: u64 },
}

/// One arena session
pub struct Simulation<U: UiSink = NullUi, A: AudioSink = NullAudio> {
    config: SimConfig,
    rng: StdRng,
    time: f32,
    level_name: String,
    world: CollisionWorld,
    doors: DoorRegistry,
    player: Player,
    enemies: EnemyManager,
    projectiles: ProjectileSystem,
    triggers: TriggerSystem,
    waves: WaveDirector,
    spawner: PassiveSpawner,
    pickups: PickupField,
    deferred: DeferredQueue<DeferredAction>,
    world_tint: Option<u32>,
    tint_generation: u64,
    last_cleanup: f32,
    state: SessionStateMachine,
    sprites: SpriteTable,
    ui: U,
    audio: A,
}

impl Simulation<HudState, AudioLog> {
    /// Session that records its UI and audio output
    pub fn recording(config: SimConfig, level: LevelData) -> Self {
        Self::new(config, level, HudState::new(), AudioLog::new())
    }
}

impl<U: UiSink, A: AudioSink> Simulation<U, A> {
    /// Start a session on `level`
    pub fn new(config: SimConfig, level: LevelData, ui: U, audio: A) -> Self {
        let mut triggers = if config.default_triggers {
            TriggerSystem::with_defaults()
        } else {
            TriggerSystem::new()
        };
        if let Some(path) = &config.triggers_file {
            if let Err(err) = triggers.load_json_file(path) {
                log::warn!("Ignoring triggers from {}: {}", path.display(), err);
            }
        }

        let player = Player::new(config.player, config.weapons.clone(), level.player_spawn);
        let sprites = SpriteTable::for_types(config.roster.ids());

        let mut sim = Self {
            rng: StdRng::seed_from_u64(config.seed),
            time: 0.0,
            level_name: level.name.clone(),
            world: CollisionWorld::new(),
            doors: DoorRegistry::new(config.doors),
            player,
            enemies: EnemyManager::new(config.roster.clone(), config.enemies),
            projectiles: ProjectileSystem::new(config.projectiles),
            triggers,
            waves: WaveDirector::new(config.waves.clone(), &level, config.pickups.height),
            spawner: PassiveSpawner::new(&level.spawn_points, config.spawning),
            pickups: PickupField::new(&level.items, config.pickups),
            deferred: DeferredQueue::new(),
            world_tint: None,
            tint_generation: 0,
            last_cleanup: 0.0,
            state: SessionStateMachine::new(),
            sprites,
            ui,
            audio,
            config,
        };
        sim.world.reload(level.colliders);
        sim.doors.rebuild(&level.doors);

        sim.ui.update_health(sim.player.health.current);
        sim.refresh_weapon_ui();
        sim.ui.update_score(sim.player.score);
        if let Some(music) = sim.config.music.clone() {
            sim.audio.play_music(&music);
        }
        log::info!(
            "Session started on '{}' ({} colliders, {} doors, {} spawners)",
            sim.level_name,
            sim.world.len(),
            sim.doors.len(),
            level.spawners.len()
        );
        sim
    }

    /// Start a session on a level from `provider`, falling back to an empty arena
    pub fn from_provider(config: SimConfig, provider: &dyn LevelProvider, name: &str, ui: U, audio: A) -> Self {
        let level = load_or_default(provider, name);
        Self::new(config, level, ui, audio)
    }

    /// Replace the level mid-session; enemies, projectiles and items are cleared
    pub fn load_level(&mut self, level: LevelData) {
        log::info!("Loading level '{}'", level.name);
        self.enemies.clear();
        self.projectiles.clear();
        self.deferred.clear();
        self.world_tint = None;
        self.player.recoil = 0.0;

        self.world.reload(level.colliders.clone());
        self.doors.rebuild(&level.doors);
        self.spawner = PassiveSpawner::new(&level.spawn_points, self.config.spawning);
        self.pickups = PickupField::new(&level.items, self.config.pickups);
        self.waves = WaveDirector::new(self.config.waves.clone(), &level, self.config.pickups.height)
            .with_start_time(self.time);
        self.player.teleport(level.player_spawn);
        self.level_name = level.name;
    }

    /// Register extra triggers from a JSON file
    pub fn load_triggers(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        Ok(self.triggers.load_json_file(path)?)
    }

    /// Advance the session by `dt` seconds
    pub fn tick(&mut self, dt: f32, input: &PlayerInput) {
        let dt = dt.max(0.0);
        self.time += dt;
        let now = self.time;

        self.run_deferred(now);
        if !self.state.current().is_running() {
            return;
        }

        self.update_player(dt, now, input);
        self.update_triggers(dt, now);
        self.update_waves(dt, now);
        self.spawner.update(now, &mut self.enemies, &mut self.rng);
        self.update_enemies(dt, now);
        self.update_projectiles(dt);
        self.doors.update(dt, self.player.position);
        self.update_pickups();
        self.cleanup_pool(now);
    }

    fn run_deferred(&mut self, now: f32) {
        for action in self.deferred.drain_due(now) {
            match action {
                DeferredAction::RevertHitFlash { enemy } => {
                    if !self.enemies.set_hit_flash(enemy, false) {
                        log::trace!("Hit flash revert for released enemy {:?}", enemy);
                    }
                }
                DeferredAction::EndRecoil => self.player.recoil = 0.0,
                DeferredAction::RestoreTint { generation } => {
                    if generation == self.tint_generation {
                        self.world_tint = None;
                    }
                }
            }
        }
    }

    fn update_player(&mut self, dt: f32, now: f32, input: &PlayerInput) {
        if input.yaw_delta != 0.0 || input.pitch_delta != 0.0 {
            self.player.look(input.yaw_delta, input.pitch_delta);
        }

        if let Some(index) = input.select_weapon {
            if self.player.select_weapon(index).is_some() {
                self.refresh_weapon_ui();
            }
        }
        if input.switch_weapon != 0 && self.player.switch_weapon(input.switch_weapon).is_some() {
            self.refresh_weapon_ui();
        }

        self.player
            .update_movement(dt, input, &self.config.movement, &self.world, &self.doors);

        if input.interact && self.doors.try_open_nearest(self.player.position, now) {
            self.audio.play_sound(ids::DOOR_OPEN, SoundSettings::new());
        }

        if input.fire {
            if let Some(shot) = self.player.fire(now, &mut self.enemies) {
                self.on_shot(shot, now);
            }
        }
    }

    fn on_shot(&mut self, shot: ShotOutcome, now: f32) {
        if !shot.sound.is_empty() {
            self.audio.play_sound(&shot.sound, SoundSettings::new());
        }
        self.ui.update_ammo(shot.ammo_left);

        self.player.recoil = self.config.player.recoil;
        self.deferred
            .schedule(now + self.config.player.recoil_duration, DeferredAction::EndRecoil);

        if let Some((enemy, outcome)) = shot.hit {
            self.apply_enemy_outcome(enemy, &outcome, now);
        }
    }

    fn apply_enemy_outcome(&mut self, enemy: Handle<Enemy>, outcome: &DamageOutcome, now: f32) {
        match outcome {
            DamageOutcome::Ignored => {}
            DamageOutcome::Hurt { .. } => {
                self.enemies.set_hit_flash(enemy, true);
                self.deferred.schedule(
                    now + self.config.player.hit_flash_duration,
                    DeferredAction::RevertHitFlash { enemy },
                );
                self.audio.play_sound(ids::ENEMY_HIT, SoundSettings::new());
            }
            DamageOutcome::Killed { position, type_id } => {
                self.player.score += 1;
                self.ui.update_score(self.player.score);
                let spatial = SpatialSettings::new(self.player.position, *position)
                    .with_max_distance(self.config.death_sound_distance);
                self.audio.play_spatial_sound(ids::ENEMY_DEATH, spatial);
                log::debug!("Killed {} (score {})", type_id, self.player.score);
            }
        }
    }

    fn update_triggers(&mut self, dt: f32, now: f32) {
        for fired in self.triggers.update(dt, self.player.position) {
            log::debug!("Trigger '{}' fired", fired.id);
            for action in fired.actions {
                self.run_trigger_action(action, now);
            }
        }
    }

    fn run_trigger_action(&mut self, action: TriggerAction, now: f32) {
        match action {
            TriggerAction::Message { text, duration } => self.ui.show_message(&text, duration),
            TriggerAction::Sound { id, volume } => {
                self.audio.play_sound(&id, SoundSettings::new().with_volume(volume));
            }
            TriggerAction::Spawn {
                enemy_type,
                count,
                offset,
            } => {
                let positions = ring_positions(
                    self.player.position,
                    offset,
                    count,
                    self.config.enemies.ground_height,
                    &mut self.rng,
                );
                for position in positions {
                    self.spawn_enemy(enemy_type.as_deref(), position);
                }
            }
            TriggerAction::LightFlash { color, duration } => {
                self.tint_generation += 1;
                self.world_tint = Some(color);
                self.deferred.schedule(
                    now + duration as f32 / 1000.0,
                    DeferredAction::RestoreTint {
                        generation: self.tint_generation,
                    },
                );
            }
        }
    }

    fn update_waves(&mut self, dt: f32, now: f32) {
        let commands = self.waves.update(
            now,
            dt,
            self.enemies.active_count(),
            self.enemies.roster(),
            &mut self.rng,
        );
        for command in commands {
            match command {
                WaveCommand::Message { text, duration_ms } => self.ui.show_message(&text, duration_ms),
                WaveCommand::SpawnEnemy { enemy_type, position } => {
                    self.enemies.spawn(&enemy_type, position, now);
                }
                WaveCommand::DropAmmo { kind, position } => self.pickups.spawn(kind, position),
                WaveCommand::WaveStarted(wave) => log::debug!("Wave {} started at {:.1}s", wave, now),
                WaveCommand::WaveCompleted(wave) => log::debug!("Wave {} cleared at {:.1}s", wave, now),
                WaveCommand::Victory => {
                    self.state.transition(SessionState::Victory, now);
                }
            }
        }
    }

    fn update_enemies(&mut self, dt: f32, now: f32) {
        let ctx = AiContext {
            dt,
            now,
            player_position: self.player.position,
            world: &self.world,
            movement: &self.config.movement,
            config: &self.config.enemies,
        };
        let report = self.enemies.update(&ctx, &mut self.projectiles);
        for hit in report.contact_hits {
            self.damage_player(hit.damage);
        }
    }

    fn update_projectiles(&mut self, dt: f32) {
        let report = self
            .projectiles
            .update(dt, &self.player.collision_box(), &self.world);
        for damage in report.player_hits {
            self.damage_player(damage);
        }
    }

    fn update_pickups(&mut self) {
        if !self.state.current().accepts_gameplay_input() {
            return;
        }
        for pickup in self.pickups.update(self.player.position) {
            match pickup.effect {
                PickupEffect::Heal(amount) => {
                    if let Some(health) = self.player.heal(amount) {
                        self.ui.update_health(health);
                    }
                }
                PickupEffect::Ammo { weapon_index, amount } => {
                    self.player.add_ammo(weapon_index, amount);
                    if weapon_index == self.player.weapons.active_index() {
                        self.ui.update_ammo(self.player.weapons.active_ammo());
                    }
                }
            }
            self.audio.play_sound(ids::COLLECT_ITEM, SoundSettings::new());
        }
    }

    fn cleanup_pool(&mut self, now: f32) {
        if now - self.last_cleanup <= self.config.spawning.cleanup_interval {
            return;
        }
        let trimmed = self.enemies.cleanup_pool(self.config.spawning.cleanup_keep);
        if trimmed > 0 {
            log::debug!("Trimmed {} pooled enemies", trimmed);
        }
        self.last_cleanup = now;
    }

    fn refresh_weapon_ui(&mut self) {
        let weapons = &self.player.weapons;
        self.ui.update_weapon(&weapons.active().name, weapons.active_ammo());
    }

    /// Damage the player and run the hurt or death side effects
    pub fn damage_player(&mut self, amount: f32) -> PlayerDamage {
        let result = self.player.take_damage(amount);
        match result {
            PlayerDamage::Ignored => {}
            PlayerDamage::Hurt { health } => {
                self.ui.update_health(health);
                self.audio.play_sound(ids::PLAYER_HURT, SoundSettings::new());
            }
            PlayerDamage::Died => {
                self.ui.update_health(0.0);
                self.ui.show_game_over();
                self.audio.play_sound(ids::PLAYER_SCREAM, SoundSettings::new());
                self.state.transition(SessionState::GameOver, self.time);
                log::info!(
                    "Player died at {:.1}s with {} kills",
                    self.time,
                    self.player.score
                );
            }
        }
        result
    }

    /// Damage an enemy and run the hit or kill side effects
    pub fn damage_enemy(&mut self, enemy: Handle<Enemy>, amount: f32) -> DamageOutcome {
        let outcome = self.enemies.damage(enemy, amount);
        self.apply_enemy_outcome(enemy, &outcome, self.time);
        outcome
    }

    /// Spawn an enemy of `enemy_type`, or of a random type
    pub fn spawn_enemy(&mut self, enemy_type: Option<&str>, position: Vec3) -> Option<Handle<Enemy>> {
        match enemy_type {
            Some(type_id) => self.enemies.spawn(type_id, position, self.time),
            None => {
                let archetype = self.enemies.roster().random(&mut self.rng)?.clone();
                Some(self.enemies.spawn_archetype(&archetype, position, self.time))
            }
        }
    }

    /// Describe the current frame
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            time: self.time,
            player: PlayerView {
                position: self.player.position,
                yaw: self.player.yaw,
                pitch: self.player.pitch,
                recoil: self.player.recoil,
                weapon_index: self.player.weapons.active_index(),
                health: self.player.health.current,
            },
            enemies: self
                .enemies
                .iter()
                .filter(|(_, enemy)| enemy.visible)
                .map(|(_, enemy)| EnemyView {
                    type_id: enemy.type_id.clone(),
                    position: enemy.position,
                    yaw: enemy.yaw,
                    animation: enemy.animation,
                    sprite: self.sprites.lookup(&enemy.type_id, enemy.animation).to_string(),
                    hit_flash: enemy.hit_flash,
                })
                .collect(),
            doors: self
                .doors
                .iter()
                .map(|door| DoorView {
                    position: door.position,
                    rotation: door.rotation,
                    offset: door.offset,
                    is_open: door.is_open,
                })
                .collect(),
            projectiles: self.projectiles.projectiles().iter().map(|p| p.position).collect(),
            pickups: self
                .pickups
                .iter()
                .map(|pickup| PickupView {
                    kind: pickup.kind,
                    position: pickup.position,
                })
                .collect(),
            world_tint: self.world_tint,
        }
    }

    /// Hand the current frame to a presenter
    pub fn render(&self, presenter: &mut dyn Presenter) {
        presenter.render(&self.snapshot());
    }

    /// Replace the sprite table used for snapshots
    pub fn set_sprites(&mut self, sprites: SpriteTable) {
        self.sprites = sprites;
    }

    /// Seconds since the session started
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Name of the loaded level
    pub fn level_name(&self) -> &str {
        &self.level_name
    }

    /// Session configuration
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Session state
    pub fn state(&self) -> SessionState {
        self.state.current()
    }

    /// Session state with its history
    pub fn state_machine(&self) -> &SessionStateMachine {
        &self.state
    }

    /// The player
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The player, mutably
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Active enemies
    pub fn enemies(&self) -> &EnemyManager {
        &self.enemies
    }

    /// Active enemies, mutably
    pub fn enemies_mut(&mut self) -> &mut EnemyManager {
        &mut self.enemies
    }

    /// Static geometry
    pub fn world(&self) -> &CollisionWorld {
        &self.world
    }

    /// Doors
    pub fn doors(&self) -> &DoorRegistry {
        &self.doors
    }

    /// Enemy projectiles
    pub fn projectiles(&self) -> &ProjectileSystem {
        &self.projectiles
    }

    /// Event triggers
    pub fn triggers(&self) -> &TriggerSystem {
        &self.triggers
    }

    /// Event triggers, mutably
    pub fn triggers_mut(&mut self) -> &mut TriggerSystem {
        &mut self.triggers
    }

    /// Wave director
    pub fn waves(&self) -> &WaveDirector {
        &self.waves
    }

    /// Continuous spawn points
    pub fn spawner(&self) -> &PassiveSpawner {
        &self.spawner
    }

    /// Items in the world
    pub fn pickups(&self) -> &PickupField {
        &self.pickups
    }

    /// Items in the world, mutably
    pub fn pickups_mut(&mut self) -> &mut PickupField {
        &mut self.pickups
    }

    /// Current world tint
    pub fn world_tint(&self) -> Option<u32> {
        self.world_tint
    }

    /// Number of pending deferred actions
    pub fn pending_deferred(&self) -> usize {
        self.deferred.len()
    }

    /// UI sink
    pub fn ui(&self) -> &U {
        &self.ui
    }

    /// UI sink, mutably
    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    /// Audio sink
    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Audio sink, mutably
    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::ItemKind;
    use approx::assert_relative_eq;
    use arena_audio::AudioEvent;

    fn quiet_config() -> SimConfig {
        SimConfig::default()
            .without_passive_spawns()
            .without_default_triggers()
            .with_waves(Vec::new())
    }

    #[test]
    fn test_start_pushes_initial_ui() {
        let sim = Simulation::recording(quiet_config(), LevelData::default());
        assert_eq!(sim.ui().health, 100.0);
        assert_eq!(sim.ui().weapon, "Tactical Pistol");
        assert_eq!(sim.ui().ammo, None);
        assert_eq!(sim.audio().current_music(), Some(ids::BACKGROUND_MUSIC));
        assert_eq!(sim.state(), SessionState::Playing);
    }

    #[test]
    fn test_light_flash_restores_only_latest() {
        let mut sim = Simulation::recording(quiet_config(), LevelData::default());
        sim.run_trigger_action(TriggerAction::LightFlash { color: 0xff0000, duration: 500 }, 0.0);
        sim.tick(0.25, &PlayerInput::idle());
        sim.run_trigger_action(TriggerAction::LightFlash { color: 0x00ff00, duration: 500 }, 0.25);
        assert_eq!(sim.world_tint(), Some(0x00ff00));

        // The first flash expires but a newer one is showing
        sim.tick(0.3, &PlayerInput::idle());
        assert_eq!(sim.world_tint(), Some(0x00ff00));

        sim.tick(0.3, &PlayerInput::idle());
        assert_eq!(sim.world_tint(), None);
    }

    #[test]
    fn test_damage_player_to_death() {
        let mut sim = Simulation::recording(quiet_config(), LevelData::default());
        assert_eq!(sim.damage_player(40.0), PlayerDamage::Hurt { health: 60.0 });
        assert_eq!(sim.damage_player(60.0), PlayerDamage::Died);
        assert_eq!(sim.damage_player(10.0), PlayerDamage::Ignored);

        assert_eq!(sim.state(), SessionState::GameOver);
        assert!(sim.ui().is_game_over());
        assert_eq!(sim.ui().health, 0.0);
        assert_eq!(sim.audio().count(ids::PLAYER_SCREAM), 1);
        assert_eq!(sim.audio().count(ids::PLAYER_HURT), 1);
    }

    #[test]
    fn test_world_freezes_after_death() {
        let mut sim = Simulation::recording(quiet_config(), LevelData::default());
        let enemy = sim
            .spawn_enemy(Some("pablo"), Vec3::new(0.0, 1.0, -20.0))
            .unwrap();
        sim.damage_player(1000.0);

        let before = sim.enemies().get(enemy).unwrap().position;
        for _ in 0..10 {
            sim.tick(0.1, &PlayerInput::forward());
        }
        assert_eq!(sim.enemies().get(enemy).unwrap().position, before);
        assert_eq!(sim.player().position, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_trigger_spawn_ring_around_player() {
        let mut sim = Simulation::recording(quiet_config(), LevelData::default());
        sim.run_trigger_action(
            TriggerAction::Spawn {
                enemy_type: Some("pera".to_string()),
                count: 3,
                offset: 5.0,
            },
            0.0,
        );
        assert_eq!(sim.enemies().active_count(), 3);
        for (_, enemy) in sim.enemies().iter() {
            assert_eq!(enemy.type_id, "pera");
            assert_eq!(enemy.position.y, 1.0);
            let flat = Vec3::new(enemy.position.x, 0.0, enemy.position.z);
            assert_relative_eq!(flat.length(), 5.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_pickup_updates_ui_and_sound() {
        let level = LevelData::default().with_item(ItemKind::MachineGun, Vec3::new(0.0, 0.0, 1.0));
        let mut sim = Simulation::recording(quiet_config(), level);
        assert_eq!(sim.player().weapons.ammo(1), Some(100));

        sim.tick(0.016, &PlayerInput::idle().with_select(1));
        assert!(sim.pickups().is_empty());
        assert_eq!(sim.player().weapons.ammo(1), Some(200));
        assert_eq!(sim.ui().weapon, "Machine Gun");
        assert_eq!(sim.ui().ammo, Some(200));
        assert!(sim
            .audio()
            .events()
            .iter()
            .any(|e| matches!(e, AudioEvent::Sound { id, .. } if id == ids::COLLECT_ITEM)));
    }
}
