//! Audio output interface
//!
//! The simulation never waits on audio. Every call is fire-and-forget, and a
//! sink that cannot play a sound simply drops it.

use crate::settings::{SoundSettings, SpatialSettings};

/// Sound identifiers the simulation emits
pub mod ids {
    pub const PISTOL: &str = "pistol";
    pub const MACHINE_GUN: &str = "machinegun";
    pub const ENEMY_DEATH: &str = "enemyDeath";
    pub const ENEMY_HIT: &str = "enemyHit";
    pub const PLAYER_SCREAM: &str = "playerScream";
    pub const PLAYER_HURT: &str = "playerHurt";
    pub const DOOR_OPEN: &str = "doorOpen";
    pub const COLLECT_ITEM: &str = "collectItem";
    pub const ROAR: &str = "roar1";
    pub const HISS: &str = "hiss1";
    pub const BACKGROUND_MUSIC: &str = "background";
}

/// Destination for sound requests
pub trait AudioSink {
    /// Play a non-positional sound
    fn play_sound(&mut self, id: &str, settings: SoundSettings);

    /// Play a sound attenuated by distance from the listener.
    ///
    /// The default attenuates here and forwards to [`play_sound`](Self::play_sound).
    fn play_spatial_sound(&mut self, id: &str, spatial: SpatialSettings) {
        if let Some(volume) = spatial.attenuated_volume() {
            self.play_sound(id, SoundSettings::new().with_volume(volume));
        }
    }

    /// Start a looping music track, replacing the current one
    fn play_music(&mut self, id: &str);

    /// Stop the current music track
    fn stop_music(&mut self);
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_sound(&mut self, _id: &str, _settings: SoundSettings) {}

    fn play_music(&mut self, _id: &str) {}

    fn stop_music(&mut self) {}
}

/// One recorded audio request
#[derive(Debug, Clone, PartialEq)]
pub enum AudioEvent {
    /// A sound was played
    Sound { id: String, settings: SoundSettings },
    /// A music track started
    MusicStarted(String),
    /// Music stopped
    MusicStopped,
}

/// Sink that records requests, for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct AudioLog {
    events: Vec<AudioEvent>,
    current_music: Option<String>,
}

impl AudioLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request so far
    pub fn events(&self) -> &[AudioEvent] {
        &self.events
    }

    /// How many times a sound was played
    pub fn count(&self, id: &str) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AudioEvent::Sound { id: played, .. } if played == id))
            .count()
    }

    /// Music track currently playing
    pub fn current_music(&self) -> Option<&str> {
        self.current_music.as_deref()
    }

    /// Forget recorded requests
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl AudioSink for AudioLog {
    fn play_sound(&mut self, id: &str, settings: SoundSettings) {
        log::trace!("Sound '{}' at volume {:.2}", id, settings.volume);
        self.events.push(AudioEvent::Sound {
            id: id.to_string(),
            settings,
        });
    }

    fn play_music(&mut self, id: &str) {
        self.current_music = Some(id.to_string());
        self.events.push(AudioEvent::MusicStarted(id.to_string()));
    }

    fn stop_music(&mut self) {
        if self.current_music.take().is_some() {
            self.events.push(AudioEvent::MusicStopped);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_math::Vec3;

    #[test]
    fn test_log_counts_sounds() {
        let mut audio = AudioLog::new();
        audio.play_sound(ids::PISTOL, SoundSettings::default());
        audio.play_sound(ids::PISTOL, SoundSettings::default());
        audio.play_sound(ids::DOOR_OPEN, SoundSettings::default());

        assert_eq!(audio.count(ids::PISTOL), 2);
        assert_eq!(audio.count(ids::DOOR_OPEN), 1);
        assert_eq!(audio.count(ids::HISS), 0);
    }

    #[test]
    fn test_spatial_out_of_range_is_dropped() {
        let mut audio = AudioLog::new();
        audio.play_spatial_sound(
            ids::ENEMY_DEATH,
            SpatialSettings::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 80.0)),
        );
        assert!(audio.events().is_empty());

        audio.play_spatial_sound(
            ids::ENEMY_DEATH,
            SpatialSettings::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0)),
        );
        assert_eq!(audio.count(ids::ENEMY_DEATH), 1);
    }

    #[test]
    fn test_music_state() {
        let mut audio = AudioLog::new();
        audio.stop_music();
        assert!(audio.events().is_empty());

        audio.play_music(ids::BACKGROUND_MUSIC);
        assert_eq!(audio.current_music(), Some("background"));
        audio.stop_music();
        assert_eq!(audio.current_music(), None);
        assert_eq!(audio.events().last(), Some(&AudioEvent::MusicStopped));
    }
}
