//! Arena Game - Session Simulation
//!
//! Ties the arena subsystems into one deterministic, headless session.
//!
//! # Features
//!
//! - Player locomotion, weapons and pickups
//! - Sliding doors that block while closed
//! - Scripted waves and continuous spawn points
//! - Event triggers, deferred effects and session state
//! - Frame snapshots for an external presenter
//!
//! # Example
//!
//! ```ignore
//! use arena_game::prelude::*;
//!
//! let config = SimConfig::load("arena.toml")?;
//! let level = load_or_default(&JsonLevelProvider::new("levels"), "arena");
//! let mut sim = Simulation::recording(config, level);
//!
//! sim.tick(1.0 / 60.0, &PlayerInput::forward().with_fire());
//! println!("{}", sim.ui().status_line());
//! ```

pub mod config;
pub mod door;
pub mod error;
pub mod grid;
pub mod level;
pub mod pickups;
pub mod player;
pub mod present;
pub mod simulation;
pub mod spawner;
pub mod state;
pub mod wave;

pub mod prelude {
    pub use crate::config::{
        DoorConfig, PickupConfig, PlayerConfig, SimConfig, SpawnConfig, WaveDefinition, WaveEntry, WaveSettings,
    };
    pub use crate::door::{Door, DoorRegistry};
    pub use crate::error::{GameError, Result};
    pub use crate::grid::{cell_center, parse_grid, GridLevelProvider};
    pub use crate::level::{
        load_or_default, DoorPlacement, ItemKind, ItemPlacement, JsonLevelProvider, LevelData, LevelProvider,
        MemoryLevelProvider, NamedSpawner, SpawnPointPlacement,
    };
    pub use crate::pickups::{Pickup, PickupEffect, PickupField};
    pub use crate::player::{Player, PlayerDamage, PlayerInput, ShotOutcome};
    pub use crate::present::{
        DoorView, EnemyView, FrameSnapshot, NullPresenter, PickupView, PlayerView, Presenter, SpriteTable,
    };
    pub use crate::simulation::{DeferredAction, Simulation};
    pub use crate::spawner::{arena_position, PassiveSpawner, SpawnPoint};
    pub use crate::state::{SessionState, SessionStateMachine, StateTransition};
    pub use crate::wave::{WaveCommand, WaveDirector, WavePhase};
}

pub use prelude::*;
