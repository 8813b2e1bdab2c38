//! Player weapons

use serde::{Deserialize, Serialize};

/// Weapon statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    /// Display name
    pub name: String,
    /// Damage per hit
    pub damage: f32,
    /// Minimum time between shots in seconds
    pub fire_delay: f32,
    /// Ammo on a fresh session (`None` = infinite)
    #[serde(default)]
    pub starting_ammo: Option<u32>,
    /// Ammo ceiling for pickups (`None` = unbounded)
    #[serde(default)]
    pub max_ammo: Option<u32>,
    /// Hitscan range
    #[serde(default = "default_range")]
    pub range: f32,
    /// Sound played per shot; empty for none
    #[serde(default)]
    pub sound: String,
}

fn default_range() -> f32 {
    1000.0
}

impl WeaponStats {
    /// Create a weapon with infinite ammo
    pub fn new(name: impl Into<String>, damage: f32, fire_delay: f32) -> Self {
        Self {
            name: name.into(),
            damage,
            fire_delay,
            starting_ammo: None,
            max_ammo: None,
            range: default_range(),
            sound: String::new(),
        }
    }

    /// Give the weapon finite ammo
    pub fn with_ammo(mut self, starting: u32, max: u32) -> Self {
        self.starting_ammo = Some(starting);
        self.max_ammo = Some(max);
        self
    }

    /// Set hitscan range
    pub fn with_range(mut self, range: f32) -> Self {
        self.range = range;
        self
    }

    /// Set the per-shot sound
    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = sound.into();
        self
    }

    /// Sidearm: 25 damage, 0.4 s delay, never runs dry
    pub fn pistol() -> Self {
        Self::new("Tactical Pistol", 25.0, 0.4).with_sound("pistol")
    }

    /// Automatic: 10 damage, 0.1 s delay, 100 rounds up to 200
    pub fn machine_gun() -> Self {
        Self::new("Machine Gun", 10.0, 0.1)
            .with_ammo(100, 200)
            .with_sound("machinegun")
    }

    /// Default loadout in switching order
    pub fn default_loadout() -> Vec<Self> {
        vec![Self::pistol(), Self::machine_gun()]
    }
}

/// Outcome of a trigger pull
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FireResult {
    /// A shot went out
    Fired {
        /// Damage the shot carries
        damage: f32,
        /// Range of the shot
        range: f32,
        /// Ammo left after the shot (`None` = infinite)
        ammo_left: Option<u32>,
    },
    /// The fire delay has not elapsed
    CoolingDown,
    /// The active weapon is out of ammo
    Empty,
}

/// The player's weapons with their ammo counts and the active selection
#[derive(Debug, Clone)]
pub struct WeaponSet {
    weapons: Vec<WeaponStats>,
    ammo: Vec<Option<u32>>,
    active: usize,
    /// Shared across weapons: switching does not reset the delay
    last_shot: Option<f32>,
}

impl WeaponSet {
    /// Create a set from a loadout; the first weapon is active
    pub fn new(weapons: Vec<WeaponStats>) -> Self {
        let weapons = if weapons.is_empty() {
            log::warn!("Empty weapon loadout, falling back to the default");
            WeaponStats::default_loadout()
        } else {
            weapons
        };
        let ammo = weapons.iter().map(|w| w.starting_ammo).collect();
        Self {
            weapons,
            ammo,
            active: 0,
            last_shot: None,
        }
    }

    /// Try to fire the active weapon at simulation time `now`
    pub fn try_fire(&mut self, now: f32) -> FireResult {
        let weapon = &self.weapons[self.active];

        if let Some(last) = self.last_shot {
            if now - last < weapon.fire_delay {
                return FireResult::CoolingDown;
            }
        }

        let slot = &mut self.ammo[self.active];
        if let Some(rounds) = slot {
            if *rounds == 0 {
                return FireResult::Empty;
            }
            *rounds -= 1;
        }

        self.last_shot = Some(now);
        FireResult::Fired {
            damage: weapon.damage,
            range: weapon.range,
            ammo_left: *slot,
        }
    }

    /// Cycle the active weapon; positive steps forward, otherwise back. Wraps.
    pub fn switch(&mut self, direction: i32) -> &WeaponStats {
        let count = self.weapons.len();
        self.active = if direction > 0 {
            (self.active + 1) % count
        } else {
            (self.active + count - 1) % count
        };
        &self.weapons[self.active]
    }

    /// Select a weapon directly; out-of-range indices are ignored
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.weapons.len() {
            self.active = index;
            true
        } else {
            false
        }
    }

    /// Add ammo to a weapon, clamped to its maximum.
    ///
    /// Returns the new count, or `None` for infinite-ammo weapons and bad
    /// indices (both no-ops).
    pub fn add_ammo(&mut self, index: usize, amount: u32) -> Option<u32> {
        let max = self.weapons.get(index)?.max_ammo;
        let rounds = self.ammo.get_mut(index)?.as_mut()?;
        let raised = rounds.saturating_add(amount);
        *rounds = match max {
            Some(max) => raised.min(max),
            None => raised,
        };
        Some(*rounds)
    }

    /// Active weapon stats
    pub fn active(&self) -> &WeaponStats {
        &self.weapons[self.active]
    }

    /// Active weapon index
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Ammo of the active weapon (`None` = infinite)
    pub fn active_ammo(&self) -> Option<u32> {
        self.ammo[self.active]
    }

    /// Ammo of any weapon
    pub fn ammo(&self, index: usize) -> Option<u32> {
        self.ammo.get(index).copied().flatten()
    }

    /// Number of weapons
    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    /// Always false; a set holds at least one weapon
    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }
}

impl Default for WeaponSet {
    fn default() -> Self {
        Self::new(WeaponStats::default_loadout())
    }
}
