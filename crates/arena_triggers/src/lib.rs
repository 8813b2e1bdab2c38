//! Arena Triggers - One-shot Event Triggers
//!
//! Declarative triggers that fire once per session when the player enters an
//! area or the session clock passes a threshold. Firing yields the trigger's
//! ordered action list; running the actions is up to the caller.
//!
//! # Features
//!
//! - Area (proximity) and time conditions
//! - Message, sound, spawn and light-flash actions
//! - Fired-set keyed by trigger id
//! - JSON definitions
//!
//! # Example
//!
//! ```ignore
//! use arena_triggers::prelude::*;
//!
//! let mut triggers = TriggerSystem::with_defaults();
//! triggers.load_json(&std::fs::read_to_string("level1_events.json")?)?;
//! for fired in triggers.update(dt, player_position) {
//!     for action in fired.actions { /* ... */ }
//! }
//! ```

pub mod error;
pub mod system;
pub mod trigger;

pub mod prelude {
    pub use crate::error::{Result, TriggerError};
    pub use crate::system::{FiredTrigger, TriggerSystem};
    pub use crate::trigger::{ring_positions, EventTrigger, TriggerAction, TriggerCondition};
}

pub use prelude::*;
