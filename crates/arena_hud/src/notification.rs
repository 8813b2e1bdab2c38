//! Timed on-screen messages

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A message shown for a fixed time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Message text
    pub text: String,
    /// Display duration in seconds
    pub duration: f32,
    /// Time remaining
    pub time_remaining: f32,
}

impl Notification {
    /// Create a notification shown for `duration_ms` milliseconds
    pub fn new(text: impl Into<String>, duration_ms: u32) -> Self {
        let duration = duration_ms as f32 / 1000.0;
        Self {
            text: text.into(),
            duration,
            time_remaining: duration,
        }
    }

    /// Count down; returns false once expired
    pub fn update(&mut self, delta_time: f32) -> bool {
        self.time_remaining -= delta_time;
        self.time_remaining > 0.0
    }
}

/// Notification manager
#[derive(Debug, Clone)]
pub struct NotificationManager {
    /// Active notifications, oldest first
    notifications: VecDeque<Notification>,
    /// Maximum kept at once; the oldest is dropped first
    pub max_visible: usize,
}

impl NotificationManager {
    /// Create a new notification manager
    pub fn new() -> Self {
        Self {
            notifications: VecDeque::new(),
            max_visible: 5,
        }
    }

    /// Push a notification
    pub fn push(&mut self, notification: Notification) {
        while self.notifications.len() >= self.max_visible.max(1) {
            self.notifications.pop_front();
        }
        self.notifications.push_back(notification);
    }

    /// Update all notifications
    pub fn update(&mut self, delta_time: f32) {
        self.notifications.retain_mut(|n| n.update(delta_time));
    }

    /// Most recent notification, the one on screen
    pub fn latest(&self) -> Option<&Notification> {
        self.notifications.back()
    }

    /// Iterate over active notifications, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Get notification count
    pub fn count(&self) -> usize {
        self.notifications.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// Drop every notification
    pub fn clear(&mut self) {
        self.notifications.clear();
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_expires() {
        let mut notif = Notification::new("Wave 1", 3000);
        assert_eq!(notif.duration, 3.0);

        assert!(notif.update(2.0));
        assert!(!notif.update(1.5));
    }

    #[test]
    fn test_notification_manager() {
        let mut manager = NotificationManager::new();

        manager.push(Notification::new("Test 1", 1000));
        manager.push(Notification::new("Test 2", 3000));
        assert_eq!(manager.count(), 2);
        assert_eq!(manager.latest().map(|n| n.text.as_str()), Some("Test 2"));

        manager.update(2.0);
        assert_eq!(manager.count(), 1);
    }

    #[test]
    fn test_oldest_dropped_when_full() {
        let mut manager = NotificationManager::new();
        manager.max_visible = 2;
        for i in 0..4 {
            manager.push(Notification::new(format!("n{}", i), 1000));
        }
        let texts: Vec<_> = manager.iter().map(|n| n.text.clone()).collect();
        assert_eq!(texts, vec!["n2", "n3"]);
    }
}
