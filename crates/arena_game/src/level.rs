//! Level data and level providers
//!
//! A level is already-parsed data: colliders, door placements, spawn points,
//! wave spawners, ammo spawners and items. Parsing the map text itself is the
//! provider's business; the session only sees [`LevelData`].

use std::collections::HashMap;
use std::path::PathBuf;

use arena_math::Vec3;
use arena_physics::{ColliderKind, StaticCollider};
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// A door as placed in the level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoorPlacement {
    /// Door center on the floor (Y is ignored)
    pub position: Vec3,
    /// Rotation about +Y in degrees; 0 spans the X axis
    #[serde(default)]
    pub rotation: f32,
}

/// A continuous spawn point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnPointPlacement {
    /// Where enemies appear
    pub position: Vec3,
    /// Type to spawn; a random type when absent
    #[serde(default)]
    pub enemy_type: Option<String>,
}

/// A named spawner used by waves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSpawner {
    /// Spawner id (`S1`..`S8` in the stock waves)
    pub id: String,
    /// Spawn position
    pub position: Vec3,
}

/// Item kinds placed in a level or dropped by waves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Heals the player
    Food,
    /// Pistol rounds
    Pistol,
    /// Machine gun rounds
    MachineGun,
}

/// An item as placed in the level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemPlacement {
    /// Item kind
    pub kind: ItemKind,
    /// Position on the floor (height comes from the pickup config)
    pub position: Vec3,
}

/// Everything a session reads from a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelData {
    /// Level name
    pub name: String,
    /// Static geometry
    pub colliders: Vec<StaticCollider>,
    /// Doors
    pub doors: Vec<DoorPlacement>,
    /// Player start (eye position)
    pub player_spawn: Vec3,
    /// Continuous spawn points
    pub spawn_points: Vec<SpawnPointPlacement>,
    /// Wave spawners
    pub spawners: Vec<NamedSpawner>,
    /// Ammo drop points
    pub ammo_spawners: Vec<Vec3>,
    /// Items present at load
    pub items: Vec<ItemPlacement>,
}

impl Default for LevelData {
    fn default() -> Self {
        Self {
            name: "empty".to_string(),
            colliders: Vec::new(),
            doors: Vec::new(),
            player_spawn: Vec3::new(0.0, 1.0, 0.0),
            spawn_points: Vec::new(),
            spawners: Vec::new(),
            ammo_spawners: Vec::new(),
            items: Vec::new(),
        }
    }
}

impl LevelData {
    /// Create an empty level
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add a floor-standing block centered at (x, z)
    pub fn with_block(mut self, kind: ColliderKind, x: f32, z: f32) -> Self {
        self.colliders.push(StaticCollider::block(kind, Vec3::new(x, 0.0, z)));
        self
    }

    /// Add a collider
    pub fn with_collider(mut self, collider: StaticCollider) -> Self {
        self.colliders.push(collider);
        self
    }

    /// Add a door
    pub fn with_door(mut self, x: f32, z: f32, rotation: f32) -> Self {
        self.doors.push(DoorPlacement {
            position: Vec3::new(x, 0.0, z),
            rotation,
        });
        self
    }

    /// Set the player start
    pub fn with_player_spawn(mut self, position: Vec3) -> Self {
        self.player_spawn = position;
        self
    }

    /// Add a continuous spawn point
    pub fn with_spawn_point(mut self, position: Vec3, enemy_type: Option<&str>) -> Self {
        self.spawn_points.push(SpawnPointPlacement {
            position,
            enemy_type: enemy_type.map(str::to_string),
        });
        self
    }

    /// Add a wave spawner
    pub fn with_spawner(mut self, id: impl Into<String>, position: Vec3) -> Self {
        self.spawners.push(NamedSpawner {
            id: id.into(),
            position,
        });
        self
    }

    /// Add an ammo drop point
    pub fn with_ammo_spawner(mut self, position: Vec3) -> Self {
        self.ammo_spawners.push(position);
        self
    }

    /// Add an item
    pub fn with_item(mut self, kind: ItemKind, position: Vec3) -> Self {
        self.items.push(ItemPlacement { kind, position });
        self
    }

    /// Positions of the spawners whose ids are listed
    pub fn spawner_positions(&self, ids: &[String]) -> Vec<Vec3> {
        self.spawners
            .iter()
            .filter(|s| ids.contains(&s.id))
            .map(|s| s.position)
            .collect()
    }
}

/// Source of level data
pub trait LevelProvider {
    /// Load a level by name
    fn load_level(&self, name: &str) -> Result<LevelData>;
}

/// Load a level, falling back to the empty default level on failure
pub fn load_or_default(provider: &dyn LevelProvider, name: &str) -> LevelData {
    match provider.load_level(name) {
        Ok(level) => {
            log::info!(
                "Loaded level '{}': {} colliders, {} doors, {} spawners",
                level.name,
                level.colliders.len(),
                level.doors.len(),
                level.spawners.len()
            );
            level
        }
        Err(err) => {
            log::warn!("Level '{}' failed to load ({}), using an empty level", name, err);
            LevelData::default()
        }
    }
}

/// Levels held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryLevelProvider {
    levels: HashMap<String, LevelData>,
}

impl MemoryLevelProvider {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a level under its own name
    pub fn with_level(mut self, level: LevelData) -> Self {
        self.insert(level);
        self
    }

    /// Add or replace a level under its own name
    pub fn insert(&mut self, level: LevelData) {
        self.levels.insert(level.name.clone(), level);
    }
}

impl LevelProvider for MemoryLevelProvider {
    fn load_level(&self, name: &str) -> Result<LevelData> {
        self.levels
            .get(name)
            .cloned()
            .ok_or_else(|| GameError::LevelNotFound(name.to_string()))
    }
}

/// Levels stored as `<root>/<name>.json`
#[derive(Debug, Clone)]
pub struct JsonLevelProvider {
    root: PathBuf,
}

impl JsonLevelProvider {
    /// Create a provider reading from `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl LevelProvider for JsonLevelProvider {
    fn load_level(&self, name: &str) -> Result<LevelData> {
        let path = self.root.join(format!("{}.json", name));
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(GameError::LevelNotFound(name.to_string()));
            }
            Err(source) => return Err(GameError::Io { path, source }),
        };
        let mut level = LevelData::from_json(&text)?;
        if level.name.is_empty() || level.name == "empty" {
            level.name = name.to_string();
        }
        Ok(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let level = LevelData::new("yard")
            .with_block(ColliderKind::Wall, 20.0, 0.0)
            .with_door(0.0, -10.0, 90.0)
            .with_spawner("S1", Vec3::new(40.0, 1.0, 0.0))
            .with_spawner("S2", Vec3::new(-40.0, 1.0, 0.0))
            .with_item(ItemKind::Food, Vec3::new(5.0, 0.0, 5.0));

        assert_eq!(level.colliders.len(), 1);
        assert_eq!(level.doors[0].rotation, 90.0);
        assert_eq!(level.spawner_positions(&["S2".to_string()]), vec![Vec3::new(-40.0, 1.0, 0.0)]);
        assert!(level.spawner_positions(&["S9".to_string()]).is_empty());
    }

    #[test]
    fn test_memory_provider_falls_back() {
        let provider = MemoryLevelProvider::new().with_level(LevelData::new("yard"));

        assert_eq!(load_or_default(&provider, "yard").name, "yard");
        assert!(matches!(provider.load_level("moon"), Err(GameError::LevelNotFound(_))));

        let fallback = load_or_default(&provider, "moon");
        assert_eq!(fallback, LevelData::default());
        assert_eq!(fallback.player_spawn, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_level_from_json() {
        let json = r#"{
            "name": "pit",
            "doors": [{ "position": [10.0, 0.0, 0.0] }],
            "spawners": [{ "id": "S1", "position": [0.0, 1.0, 30.0] }],
            "items": [{ "kind": "machinegun", "position": [1.0, 0.0, 1.0] }]
        }"#;
        let level = LevelData::from_json(json).unwrap();

        assert_eq!(level.name, "pit");
        assert_eq!(level.doors[0].rotation, 0.0);
        assert_eq!(level.items[0].kind, ItemKind::MachineGun);
        assert!(level.colliders.is_empty());
    }

    #[test]
    fn test_json_provider_missing_level() {
        let provider = JsonLevelProvider::new("/nonexistent/levels");
        assert!(matches!(provider.load_level("pit"), Err(GameError::LevelNotFound(_))));
    }
}
