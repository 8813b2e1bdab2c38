//! Arena Audio - Sound Output Interface
//!
//! The simulation describes sounds; a host decides how to play them.
//!
//! # Features
//!
//! - One-shot sound effects with volume and pitch
//! - Positional sounds with quadratic distance falloff
//! - Single looping music track
//! - Recording sink for headless runs
//!
//! # Example
//!
//! ```ignore
//! use arena_audio::prelude::*;
//!
//! let mut audio = AudioLog::new();
//! audio.play_sound(ids::DOOR_OPEN, SoundSettings::default());
//! audio.play_spatial_sound(ids::ENEMY_DEATH, SpatialSettings::new(listener, source));
//! ```

pub mod settings;
pub mod sink;

pub mod prelude {
    pub use crate::settings::{SoundSettings, SpatialSettings};
    pub use crate::sink::{ids, AudioEvent, AudioLog, AudioSink, NullAudio};
}

pub use prelude::*;
