//! Session configuration
//!
//! Every section has a `Default` carrying the reference tuning and is
//! `#[serde(default)]`, so a TOML file only needs the values it changes:
//!
//! ```toml
//! seed = 7
//!
//! [player]
//! speed = 300.0
//!
//! [spawning]
//! max_passive_active = 0
//!
//! [[waves.waves]]
//! spawners = ["S1", "S2"]
//! enemies = [{ type = "pablo", count = 3 }]
//! ```

use std::path::{Path, PathBuf};

use arena_ai::{EnemyConfig, EnemyRoster};
use arena_combat::{ProjectileConfig, WeaponStats};
use arena_math::Vec3;
use arena_physics::{MovementConfig, BLOCK_SIZE};
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Player tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Input acceleration
    pub speed: f32,
    /// Eye height above the floor
    pub eye_height: f32,
    /// Upward velocity added by a jump
    pub jump_velocity: f32,
    /// Collision box half extents around the eye
    pub half_extents: Vec3,
    /// Health ceiling
    pub max_health: f32,
    /// Weapon kick applied per shot
    pub recoil: f32,
    /// Seconds before the kick reverts
    pub recoil_duration: f32,
    /// Seconds an enemy stays tinted after a hit
    pub hit_flash_duration: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 400.0,
            eye_height: 2.0,
            jump_velocity: 15.0,
            half_extents: Vec3::ONE,
            max_health: 100.0,
            recoil: 0.2,
            recoil_duration: 0.05,
            hit_flash_duration: 0.08,
        }
    }
}

/// Door tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorConfig {
    /// Interact radius (3D distance to the door center)
    pub open_radius: f32,
    /// Horizontal distance beyond which an open door closes
    pub auto_close_distance: f32,
    /// Easing rate for the vertical offset
    pub ease_rate: f32,
    /// Offset gap below which the door snaps to its target
    pub snap_threshold: f32,
    /// Center height when closed
    pub closed_offset: f32,
    /// Center height when open
    pub open_offset: f32,
    /// Door panel width and height
    pub size: f32,
    /// Horizontal inflation of the blocking box
    pub block_margin: f32,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            open_radius: 8.0,
            auto_close_distance: 15.0,
            ease_rate: 8.0,
            snap_threshold: 0.1,
            closed_offset: BLOCK_SIZE * 0.5,
            open_offset: BLOCK_SIZE + 10.0,
            size: BLOCK_SIZE,
            block_margin: 0.2,
        }
    }
}

/// One (type, count) entry of a wave
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveEntry {
    /// Enemy type id
    #[serde(rename = "type")]
    pub enemy_type: String,
    /// How many to spawn
    pub count: u32,
}

impl WaveEntry {
    /// Create an entry
    pub fn new(enemy_type: impl Into<String>, count: u32) -> Self {
        Self {
            enemy_type: enemy_type.into(),
            count,
        }
    }
}

/// One wave: the spawner groups it uses and what it spawns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveDefinition {
    /// Spawner ids units may appear at
    pub spawners: Vec<String>,
    /// Units, spawned in order
    pub enemies: Vec<WaveEntry>,
}

impl WaveDefinition {
    /// Create a wave over the eight standard spawners
    pub fn on_all_spawners(enemies: Vec<WaveEntry>) -> Self {
        Self {
            spawners: (1..=8).map(|i| format!("S{}", i)).collect(),
            enemies,
        }
    }

    /// Total units in the wave
    pub fn total(&self) -> u32 {
        self.enemies.iter().map(|e| e.count).sum()
    }
}

/// Wave timing and the wave list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveSettings {
    /// Seconds from session start to the first wave
    pub first_wave_delay: f32,
    /// Seconds from a wave's announcement to its spawns
    pub spawn_delay: f32,
    /// Seconds from a wave's completion to the next announcement
    pub next_wave_delay: f32,
    /// Seconds from the last completion to the victory message
    pub victory_delay: f32,
    /// Random X/Z offset (each way) around a spawner
    pub jitter: f32,
    /// Seconds between ammo drops
    pub ammo_interval: f32,
    /// Waves in order
    pub waves: Vec<WaveDefinition>,
}

impl Default for WaveSettings {
    fn default() -> Self {
        let wave = |pablo, pera, patica| {
            let mut enemies = vec![WaveEntry::new("pablo", pablo), WaveEntry::new("pera", pera)];
            if patica > 0 {
                enemies.push(WaveEntry::new("patica", patica));
            }
            WaveDefinition::on_all_spawners(enemies)
        };
        Self {
            first_wave_delay: 2.0,
            spawn_delay: 1.0,
            next_wave_delay: 4.0,
            victory_delay: 3.0,
            jitter: 1.0,
            ammo_interval: 300.0,
            waves: vec![
                wave(8, 7, 0),
                wave(10, 8, 5),
                wave(10, 10, 7),
                wave(12, 10, 8),
                wave(15, 12, 10),
            ],
        }
    }
}

/// Pickup tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupConfig {
    /// Collection radius (3D distance from the eye)
    pub radius: f32,
    /// Health restored by food
    pub food_heal: f32,
    /// Rounds in a pistol ammo box
    pub pistol_ammo: u32,
    /// Rounds in a machine gun ammo box
    pub machine_gun_ammo: u32,
    /// Height items float at
    pub height: f32,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            radius: 2.0,
            food_heal: 25.0,
            pistol_ammo: 30,
            machine_gun_ammo: 100,
            height: 2.0,
        }
    }
}

/// Continuous spawning and pool housekeeping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Seconds between spawns at one spawn point
    pub interval: f32,
    /// Cap on live enemies from spawn points; 0 disables them
    pub max_passive_active: usize,
    /// Fallback spawns land within this distance of the origin in X and Z
    pub arena_half_extent: f32,
    /// Spawn height
    pub spawn_height: f32,
    /// Seconds between pool cleanups
    pub cleanup_interval: f32,
    /// Retained enemies kept by a cleanup
    pub cleanup_keep: usize,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            interval: 2.0,
            max_passive_active: 6,
            arena_half_extent: 50.0,
            spawn_height: 1.0,
            cleanup_interval: 30.0,
            cleanup_keep: 5,
        }
    }
}

/// Everything a session needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed
    pub seed: u64,
    /// Player tuning
    pub player: PlayerConfig,
    /// Friction and gravity
    pub movement: MovementConfig,
    /// Door tuning
    pub doors: DoorConfig,
    /// Enemy tuning
    pub enemies: EnemyConfig,
    /// Enemy projectiles
    pub projectiles: ProjectileConfig,
    /// Waves
    pub waves: WaveSettings,
    /// Pickups
    pub pickups: PickupConfig,
    /// Spawn points and pool cleanup
    pub spawning: SpawnConfig,
    /// Enemy types
    pub roster: EnemyRoster,
    /// Player loadout in switching order
    pub weapons: Vec<WeaponStats>,
    /// Register the built-in event triggers
    pub default_triggers: bool,
    /// Extra trigger definitions (JSON)
    pub triggers_file: Option<PathBuf>,
    /// Audible range of enemy death sounds
    pub death_sound_distance: f32,
    /// Music started with the session
    pub music: Option<String>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0x00A7_E4A5,
            player: PlayerConfig::default(),
            movement: MovementConfig::default(),
            doors: DoorConfig::default(),
            enemies: EnemyConfig::default(),
            projectiles: ProjectileConfig::default(),
            waves: WaveSettings::default(),
            pickups: PickupConfig::default(),
            spawning: SpawnConfig::default(),
            roster: EnemyRoster::default(),
            weapons: WeaponStats::default_loadout(),
            default_triggers: true,
            triggers_file: None,
            death_sound_distance: 50.0,
            music: Some(arena_audio::ids::BACKGROUND_MUSIC.to_string()),
        }
    }
}

impl SimConfig {
    /// Parse from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GameError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded session config from {}", path.display());
        Ok(config)
    }

    /// Set the RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the wave list
    pub fn with_waves(mut self, waves: Vec<WaveDefinition>) -> Self {
        self.waves.waves = waves;
        self
    }

    /// Turn continuous spawn points off
    pub fn without_passive_spawns(mut self) -> Self {
        self.spawning.max_passive_active = 0;
        self
    }

    /// Turn the built-in event triggers off
    pub fn without_default_triggers(mut self) -> Self {
        self.default_triggers = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_waves() {
        let waves = WaveSettings::default();
        let totals: Vec<u32> = waves.waves.iter().map(WaveDefinition::total).collect();
        assert_eq!(totals, vec![15, 23, 27, 30, 37]);
        assert_eq!(waves.waves[0].spawners.len(), 8);
        assert_eq!(waves.waves[0].spawners[7], "S8");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimConfig::from_toml_str(
            r#"
            seed = 7

            [player]
            speed = 300.0

            [spawning]
            max_passive_active = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.player.speed, 300.0);
        assert_eq!(config.player.eye_height, 2.0);
        assert_eq!(config.spawning.max_passive_active, 0);
        assert_eq!(config.spawning.interval, 2.0);
        assert_eq!(config.doors.open_radius, 8.0);
        assert_eq!(config.waves.waves.len(), 5);
        assert_eq!(config.weapons.len(), 2);
    }

    #[test]
    fn test_toml_wave_list() {
        let config = SimConfig::from_toml_str(
            r#"
            [[waves.waves]]
            spawners = ["S1", "S2"]
            enemies = [{ type = "pablo", count = 3 }, { type = "pera", count = 1 }]
            "#,
        )
        .unwrap();

        assert_eq!(config.waves.waves.len(), 1);
        assert_eq!(config.waves.waves[0].total(), 4);
        assert_eq!(config.waves.first_wave_delay, 2.0);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(matches!(
            SimConfig::from_toml_str("seed = \"many\""),
            Err(GameError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SimConfig::load("/nonexistent/arena.toml").unwrap_err();
        assert!(matches!(err, GameError::Io { .. }));
    }
}
