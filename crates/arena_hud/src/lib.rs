//! Arena HUD - Player-facing Status
//!
//! The simulation pushes status changes through [`UiSink`]; hosts render
//! them however they like. [`HudState`] is a headless sink that keeps the
//! latest values and a timed message queue.
//!
//! # Example
//!
//! ```ignore
//! use arena_hud::prelude::*;
//!
//! let mut hud = HudState::new();
//! hud.show_message("Wave 1 - get ready!", 3000);
//! hud.update(dt);
//! ```

pub mod notification;
pub mod sink;

pub mod prelude {
    pub use crate::notification::{Notification, NotificationManager};
    pub use crate::sink::{format_ammo, HudState, NullUi, UiSink};
}

pub use prelude::*;
