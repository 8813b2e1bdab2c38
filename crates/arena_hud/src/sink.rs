//! HUD output interface

use crate::notification::{Notification, NotificationManager};

/// Ammo text for a count (`None` = infinite)
pub fn format_ammo(ammo: Option<u32>) -> String {
    match ammo {
        Some(rounds) => rounds.to_string(),
        None => "Infinite".to_string(),
    }
}

/// Destination for HUD updates. Every call is fire-and-forget.
pub trait UiSink {
    /// Show an event message for `duration_ms` milliseconds
    fn show_message(&mut self, text: &str, duration_ms: u32);

    /// Player health changed
    fn update_health(&mut self, health: f32);

    /// Active weapon ammo changed (`None` = infinite)
    fn update_ammo(&mut self, ammo: Option<u32>);

    /// Kill count changed
    fn update_score(&mut self, score: u32);

    /// Active weapon changed
    fn update_weapon(&mut self, name: &str, ammo: Option<u32>);

    /// The session ended in defeat
    fn show_game_over(&mut self);
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullUi;

impl UiSink for NullUi {
    fn show_message(&mut self, _text: &str, _duration_ms: u32) {}
    fn update_health(&mut self, _health: f32) {}
    fn update_ammo(&mut self, _ammo: Option<u32>) {}
    fn update_score(&mut self, _score: u32) {}
    fn update_weapon(&mut self, _name: &str, _ammo: Option<u32>) {}
    fn show_game_over(&mut self) {}
}

/// Headless HUD: the latest displayed values plus the message queue
#[derive(Debug, Clone)]
pub struct HudState {
    /// Displayed health
    pub health: f32,
    /// Displayed ammo
    pub ammo: Option<u32>,
    /// Displayed kill count
    pub score: u32,
    /// Displayed weapon name
    pub weapon: String,
    /// Times the game-over screen was requested
    pub game_over_count: u32,
    /// Health at or below this shows as critical
    pub critical_health: f32,
    messages: NotificationManager,
    message_log: Vec<String>,
}

impl HudState {
    /// Create a HUD showing full health
    pub fn new() -> Self {
        Self {
            health: 100.0,
            ammo: None,
            score: 0,
            weapon: String::new(),
            game_over_count: 0,
            critical_health: 30.0,
            messages: NotificationManager::new(),
            message_log: Vec::new(),
        }
    }

    /// Expire messages
    pub fn update(&mut self, delta_time: f32) {
        self.messages.update(delta_time);
    }

    /// Message currently on screen
    pub fn current_message(&self) -> Option<&str> {
        self.messages.latest().map(|n| n.text.as_str())
    }

    /// Every message ever shown, in order
    pub fn message_log(&self) -> &[String] {
        &self.message_log
    }

    /// Check if health shows as critical
    pub fn health_critical(&self) -> bool {
        self.health <= self.critical_health
    }

    /// Check if the game-over screen is up
    pub fn is_game_over(&self) -> bool {
        self.game_over_count > 0
    }

    /// One-line status for logs
    pub fn status_line(&self) -> String {
        format!(
            "Health: {} | Weapon: {} | Ammo: {} | Kills: {}",
            self.health.floor(),
            self.weapon,
            format_ammo(self.ammo),
            self.score
        )
    }
}

impl Default for HudState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiSink for HudState {
    fn show_message(&mut self, text: &str, duration_ms: u32) {
        log::info!("[HUD] {}", text);
        self.messages.push(Notification::new(text, duration_ms));
        self.message_log.push(text.to_string());
    }

    fn update_health(&mut self, health: f32) {
        self.health = health;
    }

    fn update_ammo(&mut self, ammo: Option<u32>) {
        self.ammo = ammo;
    }

    fn update_score(&mut self, score: u32) {
        self.score = score;
    }

    fn update_weapon(&mut self, name: &str, ammo: Option<u32>) {
        self.weapon = name.to_string();
        self.ammo = ammo;
    }

    fn show_game_over(&mut self) {
        self.game_over_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hud_tracks_latest_values() {
        let mut hud = HudState::new();
        hud.update_health(25.0);
        hud.update_weapon("Machine Gun", Some(100));
        hud.update_ammo(Some(99));
        hud.update_score(3);

        assert!(hud.health_critical());
        assert_eq!(hud.status_line(), "Health: 25 | Weapon: Machine Gun | Ammo: 99 | Kills: 3");
    }

    #[test]
    fn test_messages_expire_but_stay_logged() {
        let mut hud = HudState::new();
        hud.show_message("Wave 1", 3000);
        assert_eq!(hud.current_message(), Some("Wave 1"));

        hud.update(3.5);
        assert_eq!(hud.current_message(), None);
        assert_eq!(hud.message_log(), &["Wave 1".to_string()]);
    }

    #[test]
    fn test_format_ammo() {
        assert_eq!(format_ammo(None), "Infinite");
        assert_eq!(format_ammo(Some(7)), "7");
    }
}
