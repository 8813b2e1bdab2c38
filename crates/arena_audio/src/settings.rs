//! Audio playback settings

use arena_math::Vec3;
use serde::{Deserialize, Serialize};

/// Settings for sound effect playback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoundSettings {
    /// Volume (0.0 - 1.0)
    pub volume: f32,
    /// Playback rate multiplier
    pub pitch: f32,
}

impl SoundSettings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set volume
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    /// Set playback rate
    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch.max(0.1);
        self
    }
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            volume: 1.0,
            pitch: 1.0,
        }
    }
}

/// A positional sound heard from a listener
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpatialSettings {
    /// Listener position (the player)
    pub listener: Vec3,
    /// Sound source position
    pub source: Vec3,
    /// Beyond this distance the sound is inaudible
    pub max_distance: f32,
    /// Volume at the source
    pub volume: f32,
}

impl SpatialSettings {
    /// Sound at `source` heard from `listener`, default range 50
    pub fn new(listener: Vec3, source: Vec3) -> Self {
        Self {
            listener,
            source,
            max_distance: 50.0,
            volume: 1.0,
        }
    }

    /// Set audible range
    pub fn with_max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = max_distance.max(0.1);
        self
    }

    /// Set source volume
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    /// Volume after quadratic distance falloff; `None` when out of range
    pub fn attenuated_volume(&self) -> Option<f32> {
        let distance = self.listener.distance(self.source);
        if distance > self.max_distance {
            return None;
        }
        let falloff = 1.0 - distance / self.max_distance;
        Some(self.volume * falloff * falloff)
    }
}
