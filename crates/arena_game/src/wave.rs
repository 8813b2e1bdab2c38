//! Wave director
//!
//! Drives the session through its waves: announce, spawn after a short
//! delay, wait for the arena to be cleared, drop ammo, then announce the next
//! wave or declare victory. Ammo drops also run on their own long timer.
//!
//! The director never touches enemies itself; it returns [`WaveCommand`]s for
//! the session to carry out.

use arena_ai::EnemyRoster;
use arena_math::Vec3;
use rand::Rng;

use crate::config::{WaveDefinition, WaveSettings};
use crate::level::{ItemKind, LevelData, NamedSpawner};

/// Where the director is in the wave cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WavePhase {
    /// Waiting to announce wave `wave` (zero-based)
    Idle { wave: usize, starts_at: f32 },
    /// Announced; units appear at `spawn_at`
    Spawning { wave: usize, spawn_at: f32 },
    /// Units are out; waiting for the arena to clear
    Active { wave: usize },
    /// Every wave is done
    Victory { announce_at: f32, announced: bool },
}

/// Work the session carries out for the director
#[derive(Debug, Clone, PartialEq)]
pub enum WaveCommand {
    /// Show a HUD message
    Message { text: String, duration_ms: u32 },
    /// Spawn one enemy
    SpawnEnemy { enemy_type: String, position: Vec3 },
    /// Place an ammo pickup
    DropAmmo { kind: ItemKind, position: Vec3 },
    /// Wave `n` (one-based) was announced
    WaveStarted(usize),
    /// Wave `n` (one-based) was cleared
    WaveCompleted(usize),
    /// The last wave was cleared
    Victory,
}

/// Runs the waves of one session
#[derive(Debug, Clone)]
pub struct WaveDirector {
    settings: WaveSettings,
    spawners: Vec<NamedSpawner>,
    ammo_spawners: Vec<Vec3>,
    ammo_height: f32,
    phase: WavePhase,
    enemies_spawned: u32,
    ammo_elapsed: f32,
    started: bool,
}

impl WaveDirector {
    /// Create a director; the first wave is announced after the first-wave delay
    pub fn new(settings: WaveSettings, level: &LevelData, ammo_height: f32) -> Self {
        let first = settings.first_wave_delay;
        Self {
            settings,
            spawners: level.spawners.clone(),
            ammo_spawners: level.ammo_spawners.clone(),
            ammo_height,
            phase: WavePhase::Idle { wave: 0, starts_at: first },
            enemies_spawned: 0,
            ammo_elapsed: 0.0,
            started: false,
        }
    }

    /// Shift the schedule for a director created mid-session
    pub fn with_start_time(mut self, now: f32) -> Self {
        self.phase = WavePhase::Idle {
            wave: 0,
            starts_at: now + self.settings.first_wave_delay,
        };
        self
    }

    /// Advance to simulation time `now`
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        now: f32,
        dt: f32,
        active_enemies: usize,
        roster: &EnemyRoster,
        rng: &mut R,
    ) -> Vec<WaveCommand> {
        let mut commands = Vec::new();

        if !self.started {
            self.started = true;
            self.drop_ammo(rng, &mut commands);
        }

        let phase = self.phase;
        match phase {
            WavePhase::Idle { wave, starts_at } if now >= starts_at => self.start_wave(wave, now, &mut commands),
            WavePhase::Spawning { wave, spawn_at } if now >= spawn_at => {
                self.spawn_wave(wave, now, roster, rng, &mut commands)
            }
            WavePhase::Active { wave } if active_enemies == 0 && self.enemies_spawned > 0 => {
                self.complete_wave(wave, now, rng, &mut commands)
            }
            WavePhase::Victory { announce_at, announced: false } if now >= announce_at => {
                commands.push(WaveCommand::Message {
                    text: "ALL WAVES CLEARED! VICTORY!".to_string(),
                    duration_ms: 5000,
                });
                commands.push(WaveCommand::Victory);
                self.phase = WavePhase::Victory {
                    announce_at,
                    announced: true,
                };
            }
            _ => {}
        }

        self.ammo_elapsed += dt;
        if self.ammo_elapsed >= self.settings.ammo_interval {
            self.ammo_elapsed = 0.0;
            self.drop_ammo(rng, &mut commands);
            commands.push(WaveCommand::Message {
                text: "Ammo supplies have arrived!".to_string(),
                duration_ms: 3000,
            });
        }

        commands
    }

    fn start_wave(&mut self, wave: usize, now: f32, commands: &mut Vec<WaveCommand>) {
        if wave >= self.settings.waves.len() {
            self.phase = WavePhase::Victory {
                announce_at: now,
                announced: false,
            };
            return;
        }

        let number = wave + 1;
        log::info!("Wave {} starting", number);
        self.enemies_spawned = 0;
        commands.push(WaveCommand::Message {
            text: format!("WAVE {} - GET READY!", number),
            duration_ms: 3000,
        });
        commands.push(WaveCommand::WaveStarted(number));
        self.phase = WavePhase::Spawning {
            wave,
            spawn_at: now + self.settings.spawn_delay,
        };
    }

    fn spawn_wave<R: Rng + ?Sized>(
        &mut self,
        wave: usize,
        now: f32,
        roster: &EnemyRoster,
        rng: &mut R,
        commands: &mut Vec<WaveCommand>,
    ) {
        let definition = &self.settings.waves[wave];
        let positions: Vec<Vec3> = self
            .spawners
            .iter()
            .filter(|s| definition.spawners.contains(&s.id))
            .map(|s| s.position)
            .collect();

        if positions.is_empty() {
            log::warn!("Wave {} has no usable spawners, skipping it", wave + 1);
            self.phase = WavePhase::Idle {
                wave: wave + 1,
                starts_at: now + self.settings.next_wave_delay,
            };
            return;
        }

        let jitter = self.settings.jitter;
        let mut spawned = 0;
        for entry in &definition.enemies {
            if roster.get(&entry.enemy_type).is_none() {
                log::warn!("Wave {}: unknown enemy type '{}', entry skipped", wave + 1, entry.enemy_type);
                continue;
            }
            for _ in 0..entry.count {
                let base = positions[rng.gen_range(0..positions.len())];
                let position = base + Vec3::new(offset(jitter, rng), 0.0, offset(jitter, rng));
                commands.push(WaveCommand::SpawnEnemy {
                    enemy_type: entry.enemy_type.clone(),
                    position,
                });
                spawned += 1;
            }
        }
        log::info!("Wave {}: {} enemies spawned", wave + 1, spawned);

        if spawned == 0 {
            log::warn!("Wave {} spawned nothing, skipping it", wave + 1);
            self.phase = WavePhase::Idle {
                wave: wave + 1,
                starts_at: now + self.settings.next_wave_delay,
            };
            return;
        }

        self.enemies_spawned = spawned;
        self.phase = WavePhase::Active { wave };
    }

    fn complete_wave<R: Rng + ?Sized>(&mut self, wave: usize, now: f32, rng: &mut R, commands: &mut Vec<WaveCommand>) {
        let number = wave + 1;
        log::info!("Wave {} complete", number);
        commands.push(WaveCommand::Message {
            text: format!("WAVE {} COMPLETE!", number),
            duration_ms: 3000,
        });
        commands.push(WaveCommand::WaveCompleted(number));
        self.drop_ammo(rng, commands);

        self.phase = if number < self.settings.waves.len() {
            WavePhase::Idle {
                wave: number,
                starts_at: now + self.settings.next_wave_delay,
            }
        } else {
            WavePhase::Victory {
                announce_at: now + self.settings.victory_delay,
                announced: false,
            }
        };
    }

    fn drop_ammo<R: Rng + ?Sized>(&self, rng: &mut R, commands: &mut Vec<WaveCommand>) {
        if self.ammo_spawners.is_empty() {
            return;
        }
        log::debug!("Dropping ammo at {} spawners", self.ammo_spawners.len());
        let jitter = self.settings.jitter;
        for spawner in &self.ammo_spawners {
            let kind = if rng.gen_bool(0.5) {
                ItemKind::Pistol
            } else {
                ItemKind::MachineGun
            };
            let position = Vec3::new(
                spawner.x + offset(jitter, rng),
                self.ammo_height,
                spawner.z + offset(jitter, rng),
            );
            commands.push(WaveCommand::DropAmmo { kind, position });
        }
    }

    /// Current phase
    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    /// Zero-based index of the wave in play or coming up
    pub fn current_wave(&self) -> usize {
        let phase = self.phase;
        match phase {
            WavePhase::Idle { wave, .. } | WavePhase::Spawning { wave, .. } | WavePhase::Active { wave } => wave,
            WavePhase::Victory { .. } => self.settings.waves.len(),
        }
    }

    /// Enemies spawned by the current wave
    pub fn enemies_spawned(&self) -> u32 {
        self.enemies_spawned
    }

    /// Check if every wave has been cleared
    pub fn is_victory(&self) -> bool {
        matches!(self.phase, WavePhase::Victory { .. })
    }

    /// Wave list
    pub fn waves(&self) -> &[WaveDefinition] {
        &self.settings.waves
    }
}

fn offset<R: Rng + ?Sized>(jitter: f32, rng: &mut R) -> f32 {
    if jitter > 0.0 {
        rng.gen_range(-jitter..=jitter)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WaveEntry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn arena() -> LevelData {
        let mut level = LevelData::new("ring");
        for i in 1..=8 {
            let angle = i as f32;
            level = level.with_spawner(format!("S{}", i), Vec3::new(angle.cos() * 40.0, 1.0, angle.sin() * 40.0));
        }
        level.with_ammo_spawner(Vec3::new(0.0, 0.0, 10.0))
    }

    fn spawns(commands: &[WaveCommand]) -> usize {
        commands
            .iter()
            .filter(|c| matches!(c, WaveCommand::SpawnEnemy { .. }))
            .count()
    }

    fn run(director: &mut WaveDirector, from: f32, to: f32, active: usize, rng: &mut StdRng) -> Vec<WaveCommand> {
        let roster = EnemyRoster::default();
        let dt = 0.1;
        let mut commands = Vec::new();
        let mut t = from;
        while t < to - 1e-4 {
            t += dt;
            commands.extend(director.update(t, dt, active, &roster, rng));
        }
        commands
    }

    #[test]
    fn test_first_wave_timeline() {
        let mut director = WaveDirector::new(WaveSettings::default(), &arena(), 2.0);
        let mut rng = StdRng::seed_from_u64(1);

        let early = run(&mut director, 0.0, 1.9, 0, &mut rng);
        assert_eq!(spawns(&early), 0);
        assert!(early.iter().any(|c| matches!(c, WaveCommand::DropAmmo { .. })));
        assert!(!early.iter().any(|c| matches!(c, WaveCommand::WaveStarted(_))));

        let announce = run(&mut director, 1.9, 2.5, 0, &mut rng);
        assert!(announce.contains(&WaveCommand::WaveStarted(1)));
        assert_eq!(spawns(&announce), 0);
        // Nothing spawned yet, so an empty arena does not complete the wave
        assert!(matches!(director.phase(), WavePhase::Spawning { wave: 0, .. }));

        let spawned = run(&mut director, 2.5, 3.2, 15, &mut rng);
        assert_eq!(spawns(&spawned), 15);
        assert_eq!(director.enemies_spawned(), 15);
        assert_eq!(director.phase(), WavePhase::Active { wave: 0 });
    }

    #[test]
    fn test_spawns_jitter_around_spawners() {
        let level = arena();
        let mut director = WaveDirector::new(WaveSettings::default(), &level, 2.0);
        let mut rng = StdRng::seed_from_u64(2);
        let commands = run(&mut director, 0.0, 3.5, 15, &mut rng);

        for command in commands {
            if let WaveCommand::SpawnEnemy { position, .. } = command {
                let near = level.spawners.iter().any(|s| {
                    (position.x - s.position.x).abs() <= 1.0 && (position.z - s.position.z).abs() <= 1.0
                });
                assert!(near);
            }
        }
    }

    #[test]
    fn test_completion_fires_once_then_next_wave() {
        let mut director = WaveDirector::new(WaveSettings::default(), &arena(), 2.0);
        let mut rng = StdRng::seed_from_u64(3);
        run(&mut director, 0.0, 3.5, 15, &mut rng);

        let cleared = run(&mut director, 3.5, 5.0, 0, &mut rng);
        let completions = cleared
            .iter()
            .filter(|c| matches!(c, WaveCommand::WaveCompleted(_)))
            .count();
        assert_eq!(completions, 1);
        assert!(cleared.iter().any(|c| matches!(c, WaveCommand::DropAmmo { .. })));
        assert!(matches!(director.phase(), WavePhase::Idle { wave: 1, .. }));

        let next = run(&mut director, 5.0, 7.0, 0, &mut rng);
        assert!(!next.contains(&WaveCommand::WaveStarted(2)));
        let next = run(&mut director, 7.0, 8.0, 0, &mut rng);
        assert!(next.contains(&WaveCommand::WaveStarted(2)));
    }

    #[test]
    fn test_victory_after_last_wave() {
        let settings = WaveSettings {
            waves: vec![WaveDefinition::on_all_spawners(vec![WaveEntry::new("patica", 2)])],
            ..WaveSettings::default()
        };
        let mut director = WaveDirector::new(settings, &arena(), 2.0);
        let mut rng = StdRng::seed_from_u64(4);
        run(&mut director, 0.0, 3.5, 2, &mut rng);
        run(&mut director, 3.5, 4.0, 0, &mut rng);
        assert!(director.is_victory());

        let late = run(&mut director, 4.0, 8.0, 0, &mut rng);
        let victories = late.iter().filter(|c| matches!(c, WaveCommand::Victory)).count();
        assert_eq!(victories, 1);
    }

    #[test]
    fn test_unknown_type_and_missing_spawners() {
        let settings = WaveSettings {
            waves: vec![
                WaveDefinition::on_all_spawners(vec![WaveEntry::new("ghost", 3), WaveEntry::new("pablo", 1)]),
                WaveDefinition {
                    spawners: vec!["S99".to_string()],
                    enemies: vec![WaveEntry::new("pablo", 4)],
                },
            ],
            ..WaveSettings::default()
        };
        let mut director = WaveDirector::new(settings, &arena(), 2.0);
        let mut rng = StdRng::seed_from_u64(5);

        let first = run(&mut director, 0.0, 3.5, 1, &mut rng);
        assert_eq!(spawns(&first), 1);

        run(&mut director, 3.5, 4.0, 0, &mut rng);
        let second = run(&mut director, 4.0, 10.0, 0, &mut rng);
        assert!(second.contains(&WaveCommand::WaveStarted(2)));
        assert_eq!(spawns(&second), 0);
        assert!(!second.contains(&WaveCommand::WaveCompleted(2)));
    }

    #[test]
    fn test_periodic_ammo() {
        let settings = WaveSettings {
            ammo_interval: 1.0,
            waves: Vec::new(),
            ..WaveSettings::default()
        };
        let mut director = WaveDirector::new(settings, &arena(), 2.0);
        let mut rng = StdRng::seed_from_u64(6);

        let commands = run(&mut director, 0.0, 2.55, 0, &mut rng);
        let drops = commands
            .iter()
            .filter(|c| matches!(c, WaveCommand::DropAmmo { .. }))
            .count();
        // Once at start, then every second
        assert_eq!(drops, 3);
        for command in commands {
            if let WaveCommand::DropAmmo { position, .. } = command {
                assert_eq!(position.y, 2.0);
            }
        }
    }
}
