//! Food and ammo pickups

use arena_math::Vec3;

use crate::config::PickupConfig;
use crate::level::{ItemKind, ItemPlacement};

/// What a pickup gives
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickupEffect {
    /// Restore health
    Heal(f32),
    /// Add rounds to a weapon slot
    Ammo { weapon_index: usize, amount: u32 },
}

impl PickupEffect {
    /// Effect of an item kind under `config`
    pub fn for_kind(kind: ItemKind, config: &PickupConfig) -> Self {
        match kind {
            ItemKind::Food => Self::Heal(config.food_heal),
            ItemKind::Pistol => Self::Ammo {
                weapon_index: 0,
                amount: config.pistol_ammo,
            },
            ItemKind::MachineGun => Self::Ammo {
                weapon_index: 1,
                amount: config.machine_gun_ammo,
            },
        }
    }
}

/// An item in the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    /// Item kind
    pub kind: ItemKind,
    /// What collecting it does
    pub effect: PickupEffect,
    /// World position
    pub position: Vec3,
    /// Already taken
    pub collected: bool,
}

/// Every uncollected item of the session
#[derive(Debug, Clone, Default)]
pub struct PickupField {
    items: Vec<Pickup>,
    config: PickupConfig,
}

impl PickupField {
    /// Create a field holding a level's items
    pub fn new(placements: &[ItemPlacement], config: PickupConfig) -> Self {
        let mut field = Self {
            items: Vec::with_capacity(placements.len()),
            config,
        };
        for placement in placements {
            field.spawn(placement.kind, placement.position);
        }
        field
    }

    /// Place an item; its height comes from the config
    pub fn spawn(&mut self, kind: ItemKind, position: Vec3) {
        self.items.push(Pickup {
            kind,
            effect: PickupEffect::for_kind(kind, &self.config),
            position: Vec3::new(position.x, self.config.height, position.z),
            collected: false,
        });
    }

    /// Collect everything within reach of the player
    pub fn update(&mut self, player_position: Vec3) -> Vec<Pickup> {
        let radius = self.config.radius;
        let mut taken = Vec::new();
        for item in &mut self.items {
            if !item.collected && player_position.distance(item.position) < radius {
                item.collected = true;
                taken.push(*item);
            }
        }
        self.items.retain(|item| !item.collected);
        taken
    }

    /// Iterate over items in the world
    pub fn iter(&self) -> impl Iterator<Item = &Pickup> {
        self.items.iter()
    }

    /// Number of items in the world
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the world holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effects() {
        let config = PickupConfig::default();
        assert_eq!(PickupEffect::for_kind(ItemKind::Food, &config), PickupEffect::Heal(25.0));
        assert_eq!(
            PickupEffect::for_kind(ItemKind::Pistol, &config),
            PickupEffect::Ammo { weapon_index: 0, amount: 30 }
        );
        assert_eq!(
            PickupEffect::for_kind(ItemKind::MachineGun, &config),
            PickupEffect::Ammo { weapon_index: 1, amount: 100 }
        );
    }

    #[test]
    fn test_collect_within_radius_once() {
        let placements = vec![
            ItemPlacement { kind: ItemKind::Food, position: Vec3::new(0.0, 0.0, 1.0) },
            ItemPlacement { kind: ItemKind::Pistol, position: Vec3::new(10.0, 0.0, 0.0) },
        ];
        let mut field = PickupField::new(&placements, PickupConfig::default());
        assert_eq!(field.iter().next().unwrap().position.y, 2.0);

        let taken = field.update(Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(taken.len(), 1);
        assert_eq!(taken[0].kind, ItemKind::Food);
        assert_eq!(field.len(), 1);

        assert!(field.update(Vec3::new(0.0, 2.0, 0.0)).is_empty());
    }
}
