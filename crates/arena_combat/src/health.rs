//! Health component and management

use serde::{Deserialize, Serialize};

/// Health pool clamped to `0..=max`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthComponent {
    /// Current health
    pub current: f32,
    /// Maximum health
    pub max: f32,
    /// Whether health has reached zero
    #[serde(skip)]
    pub is_dead: bool,
}

impl HealthComponent {
    /// Create a new health component at full health
    pub fn new(max_health: f32) -> Self {
        Self {
            current: max_health,
            max: max_health,
            is_dead: false,
        }
    }

    /// Start from a health value other than the maximum
    pub fn with_current(mut self, current: f32) -> Self {
        self.set_health(current);
        self
    }

    /// Apply damage to this health component.
    ///
    /// Returns the damage actually removed and whether this hit killed.
    /// A dead component ignores further damage, so death is reported once.
    pub fn apply_damage(&mut self, amount: f32) -> (f32, bool) {
        if self.is_dead {
            return (0.0, false);
        }

        let before = self.current;
        self.current = (self.current - amount.max(0.0)).max(0.0);

        let died = self.current <= 0.0;
        if died {
            self.is_dead = true;
        }

        (before - self.current, died)
    }

    /// Heal the entity
    /// Returns the actual amount healed
    pub fn heal(&mut self, amount: f32) -> f32 {
        if self.is_dead {
            return 0.0;
        }

        let old_health = self.current;
        self.current = (self.current + amount.max(0.0)).min(self.max);
        self.current - old_health
    }

    /// Set health directly (clamped to 0..max)
    pub fn set_health(&mut self, health: f32) {
        self.current = health.clamp(0.0, self.max);
        self.is_dead = self.current <= 0.0;
    }

    /// Back to full health with a (possibly new) maximum
    pub fn reset(&mut self, max_health: f32) {
        self.max = max_health;
        self.current = max_health;
        self.is_dead = false;
    }

    /// Check if at full health
    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Check if alive
    pub fn is_alive(&self) -> bool {
        !self.is_dead
    }
}

impl Default for HealthComponent {
    fn default() -> Self {
        Self::new(100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_health_component() {
        let mut health = HealthComponent::new(150.0);

        let (dealt, died) = health.apply_damage(25.0);
        assert_eq!(dealt, 25.0);
        assert!(!died);
        assert_eq!(health.current, 125.0);
    }

    #[test]
    fn test_fractional_damage_accumulates() {
        let mut health = HealthComponent::new(100.0);
        for _ in 0..10 {
            health.apply_damage(0.1);
        }
        assert_relative_eq!(health.current, 99.0, epsilon = 1e-4);

        let (dealt, died) = health.apply_damage(98.7);
        assert_relative_eq!(dealt, 98.7, epsilon = 1e-4);
        assert!(!died);
        assert_relative_eq!(health.current, 0.3, epsilon = 1e-4);
    }

    #[test]
    fn test_death_reported_once() {
        let mut health = HealthComponent::new(50.0);

        let (dealt, died) = health.apply_damage(100.0);
        assert_eq!(dealt, 50.0);
        assert!(died);
        assert_eq!(health.current, 0.0);

        let (dealt, died) = health.apply_damage(10.0);
        assert_eq!(dealt, 0.0);
        assert!(!died);
    }

    #[test]
    fn test_healing() {
        let mut health = HealthComponent::new(100.0).with_current(50.0);

        let healed = health.heal(30.0);
        assert_eq!(healed, 30.0);
        assert_eq!(health.current, 80.0);

        // Can't overheal
        let healed = health.heal(50.0);
        assert_eq!(healed, 20.0);
        assert_eq!(health.current, 100.0);
    }

    #[test]
    fn test_dead_cannot_heal_until_reset() {
        let mut health = HealthComponent::new(10.0);
        health.apply_damage(10.0);
        assert_eq!(health.heal(5.0), 0.0);

        health.reset(80.0);
        assert!(health.is_alive());
        assert_eq!(health.current, 80.0);
        assert!(health.is_full());
    }
}
