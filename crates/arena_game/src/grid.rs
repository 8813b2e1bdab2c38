//! Text grid levels
//!
//! One character per [`BLOCK_SIZE`] cell, rows running along +Z, the grid
//! centered on the origin:
//!
//! | char | cell |
//! |---|---|
//! | `#` | wall |
//! | `B` | bush |
//! | `R` | brick |
//! | `T` | model |
//! | `D` | door |
//! | `P` | player start |
//! | `E` | continuous spawn point |
//! | `1`-`8` | wave spawner `S1`-`S8` |
//! | `A` | ammo drop point |
//! | `+` | food |
//! | `.` or space | floor |
//!
//! Without a `P` the player starts on the middle floor cell.

use std::path::PathBuf;

use arena_math::Vec3;
use arena_physics::{ColliderKind, BLOCK_SIZE};

use crate::error::{GameError, Result};
use crate::level::{ItemKind, LevelData, LevelProvider};

/// Height of spawned actors and the player start
const ACTOR_HEIGHT: f32 = 1.0;

/// World position of the center of cell (`column`, `row`)
pub fn cell_center(column: usize, row: usize, width: usize, height: usize) -> Vec3 {
    let offset_x = width as f32 * BLOCK_SIZE * 0.5;
    let offset_z = height as f32 * BLOCK_SIZE * 0.5;
    Vec3::new(
        column as f32 * BLOCK_SIZE - offset_x + BLOCK_SIZE * 0.5,
        0.0,
        row as f32 * BLOCK_SIZE - offset_z + BLOCK_SIZE * 0.5,
    )
}

fn is_blocking(cell: Option<u8>) -> bool {
    matches!(cell, Some(b'#' | b'B' | b'R' | b'T'))
}

/// Parse a text grid into level data
pub fn parse_grid(name: &str, text: &str) -> LevelData {
    let rows: Vec<&[u8]> = text
        .trim_matches('\n')
        .lines()
        .map(|line| line.trim_end_matches('\r').as_bytes())
        .collect();
    let height = rows.len();
    let width = rows.first().map_or(0, |row| row.len());
    let at = |column: usize, row: usize| rows.get(row).and_then(|r| r.get(column)).copied();

    let mut level = LevelData::new(name);
    let mut floors = Vec::new();
    let mut player_spawn = None;

    for (row, line) in rows.iter().enumerate() {
        for (column, &cell) in line.iter().enumerate() {
            let center = cell_center(column, row, width, height);
            let actor = Vec3::new(center.x, ACTOR_HEIGHT, center.z);
            match cell {
                b'#' => level = level.with_block(ColliderKind::Wall, center.x, center.z),
                b'B' => level = level.with_block(ColliderKind::Bush, center.x, center.z),
                b'R' => level = level.with_block(ColliderKind::Brick, center.x, center.z),
                b'T' => level = level.with_block(ColliderKind::Model, center.x, center.z),
                b'D' => {
                    // Span the gap between the walls on either side
                    let across_x = column > 0 && is_blocking(at(column - 1, row)) && is_blocking(at(column + 1, row));
                    let rotation = if across_x { 0.0 } else { 90.0 };
                    level = level.with_door(center.x, center.z, rotation);
                }
                b'P' => player_spawn = Some(actor),
                b'E' => {
                    level = level.with_spawn_point(actor, None);
                    floors.push(center);
                }
                b'1'..=b'8' => {
                    level = level.with_spawner(format!("S{}", cell as char), actor);
                    floors.push(center);
                }
                b'A' => {
                    level = level.with_ammo_spawner(center);
                    floors.push(center);
                }
                b'+' => {
                    level = level.with_item(ItemKind::Food, center);
                    floors.push(center);
                }
                b'.' | b' ' => floors.push(center),
                other => log::debug!("Unknown grid cell '{}' at ({}, {})", other as char, column, row),
            }
        }
    }

    level.player_spawn = player_spawn
        .or_else(|| {
            floors
                .get(floors.len() / 2)
                .map(|floor| Vec3::new(floor.x, ACTOR_HEIGHT, floor.z))
        })
        .unwrap_or(level.player_spawn);
    level
}

/// Levels stored as `<root>/<name>.txt` grids
#[derive(Debug, Clone)]
pub struct GridLevelProvider {
    root: PathBuf,
}

impl GridLevelProvider {
    /// Create a provider reading from `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl LevelProvider for GridLevelProvider {
    fn load_level(&self, name: &str) -> Result<LevelData> {
        let path = self.root.join(format!("{}.txt", name));
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(parse_grid(name, &text)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(GameError::LevelNotFound(name.to_string())),
            Err(source) => Err(GameError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YARD: &str = "\
#####
#1.E#
#.P.D
#+.A#
#####
";

    #[test]
    fn test_cell_centers() {
        assert_eq!(cell_center(0, 0, 5, 5), Vec3::new(-20.0, 0.0, -20.0));
        assert_eq!(cell_center(2, 2, 5, 5), Vec3::ZERO);
        assert_eq!(cell_center(1, 0, 2, 1), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_parse_cells() {
        let level = parse_grid("yard", YARD);
        assert_eq!(level.name, "yard");
        assert_eq!(level.colliders.len(), 15);
        assert_eq!(level.player_spawn, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(level.spawners.len(), 1);
        assert_eq!(level.spawners[0].id, "S1");
        assert_eq!(level.spawners[0].position, Vec3::new(-10.0, 1.0, -10.0));
        assert_eq!(level.spawn_points.len(), 1);
        assert_eq!(level.ammo_spawners, vec![Vec3::new(10.0, 0.0, 10.0)]);
        assert_eq!(level.items.len(), 1);
        assert_eq!(level.items[0].kind, ItemKind::Food);
    }

    #[test]
    fn test_door_orientation() {
        let level = parse_grid("doors", "#D#\n...\n.D.\n");
        assert_eq!(level.doors.len(), 2);
        assert_eq!(level.doors[0].rotation, 0.0);
        assert_eq!(level.doors[1].rotation, 90.0);
    }

    #[test]
    fn test_player_defaults_to_middle_floor() {
        let level = parse_grid("plain", "...\n");
        assert_eq!(level.player_spawn, Vec3::new(0.0, 1.0, 0.0));
    }
}
