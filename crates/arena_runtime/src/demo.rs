//! Built-in demo arena

use arena_game::{parse_grid, LevelData};

/// Walled yard with a side room behind a door, eight wave spawners,
/// two continuous spawn points, ammo drops and food
pub const DEMO_ARENA: &str = "\
###############
#1.....#.....2#
#......#......#
#..B...D..R...#
#......#......#
#.E..........A#
#8...........3#
#......P......#
#7...........4#
#.+...........#
#......E......#
#..R.......B..#
#.............#
#6.....5.....A#
###############
";

/// The demo arena as level data
pub fn arena() -> LevelData {
    parse_grid("demo", DEMO_ARENA)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_game::SimConfig;

    #[test]
    fn test_demo_rows_are_even() {
        let widths: Vec<usize> = DEMO_ARENA.lines().map(str::len).collect();
        assert!(widths.iter().all(|&w| w == widths[0]));
    }

    #[test]
    fn test_demo_has_every_wave_spawner() {
        let level = arena();
        let config = SimConfig::default();
        for wave in &config.waves.waves {
            assert!(!level.spawner_positions(&wave.spawners).is_empty());
        }
        assert_eq!(level.spawners.len(), 8);
        assert_eq!(level.doors.len(), 1);
        assert_eq!(level.spawn_points.len(), 2);
        assert_eq!(level.ammo_spawners.len(), 2);
    }

    #[test]
    fn test_demo_spawn_is_clear() {
        let level = arena();
        assert_eq!(level.player_spawn.x, 0.0);
        assert_eq!(level.player_spawn.z, 0.0);
        assert!(level
            .colliders
            .iter()
            .all(|c| !c.aabb.contains_point(level.player_spawn)));
    }
}
