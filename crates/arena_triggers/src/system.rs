//! Trigger evaluation

use std::collections::HashSet;
use std::path::Path;

use arena_math::Vec3;

use crate::error::{Result, TriggerError};
use crate::trigger::{EventTrigger, TriggerAction};

/// A trigger that fired this update, with the actions to run
#[derive(Debug, Clone, PartialEq)]
pub struct FiredTrigger {
    /// Trigger id
    pub id: String,
    /// Actions in execution order
    pub actions: Vec<TriggerAction>,
}

/// Evaluates one-shot triggers once per tick
#[derive(Debug, Clone, Default)]
pub struct TriggerSystem {
    triggers: Vec<EventTrigger>,
    fired: HashSet<String>,
    elapsed: f32,
}

impl TriggerSystem {
    /// Create a system with no triggers
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a system holding the default triggers
    pub fn with_defaults() -> Self {
        let mut system = Self::new();
        for trigger in EventTrigger::defaults() {
            system.register(trigger);
        }
        system
    }

    /// Add a trigger; a trigger with the same id is replaced
    pub fn register(&mut self, trigger: EventTrigger) {
        if let Some(existing) = self.triggers.iter_mut().find(|t| t.id == trigger.id) {
            log::warn!("Trigger '{}' registered twice, keeping the newer one", trigger.id);
            *existing = trigger;
        } else {
            self.triggers.push(trigger);
        }
    }

    /// Parse a JSON array of triggers and register them.
    ///
    /// Returns how many were registered.
    pub fn load_json(&mut self, json: &str) -> Result<usize> {
        let triggers: Vec<EventTrigger> = serde_json::from_str(json)?;
        for trigger in &triggers {
            validate(trigger)?;
        }
        let count = triggers.len();
        for trigger in triggers {
            self.register(trigger);
        }
        log::info!("Loaded {} event triggers", count);
        Ok(count)
    }

    /// Load triggers from a JSON file
    pub fn load_json_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TriggerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_json(&text)
    }

    /// Advance session time and fire every trigger whose condition holds.
    ///
    /// A trigger fires at most once; later updates skip it.
    pub fn update(&mut self, dt: f32, player_position: Vec3) -> Vec<FiredTrigger> {
        self.elapsed += dt;

        let mut fired = Vec::new();
        for trigger in &self.triggers {
            if self.fired.contains(&trigger.id) {
                continue;
            }
            if trigger.trigger.is_met(player_position, self.elapsed) {
                log::debug!("Trigger '{}' fired at {:.2}s", trigger.id, self.elapsed);
                self.fired.insert(trigger.id.clone());
                fired.push(FiredTrigger {
                    id: trigger.id.clone(),
                    actions: trigger.actions.clone(),
                });
            }
        }
        fired
    }

    /// Check if a trigger has fired
    pub fn has_fired(&self, id: &str) -> bool {
        self.fired.contains(id)
    }

    /// Session time seen by time conditions
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Forget fired triggers and restart the clock
    pub fn reset(&mut self) {
        self.fired.clear();
        self.elapsed = 0.0;
    }

    /// Remove every trigger
    pub fn clear(&mut self) {
        self.triggers.clear();
        self.reset();
    }

    /// Registered triggers
    pub fn triggers(&self) -> &[EventTrigger] {
        &self.triggers
    }

    /// Number of registered triggers
    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }
}

fn validate(trigger: &EventTrigger) -> Result<()> {
    let invalid = |reason: &str| TriggerError::Invalid {
        id: trigger.id.clone(),
        reason: reason.to_string(),
    };

    if trigger.id.is_empty() {
        return Err(invalid("empty id"));
    }
    if let crate::trigger::TriggerCondition::Area { radius, .. } = trigger.trigger {
        if !(radius > 0.0) {
            return Err(invalid("area radius must be positive"));
        }
    }
    Ok(())
}
