//! Arena Runtime
//!
//! Headless entry point for the arena simulation. Loads the run
//! configuration, builds the level, then drives a session with scripted
//! input at a fixed step, printing HUD messages as they appear and a
//! summary at the end.
//!
//! Run with: cargo run -p arena_runtime
//!       or: cargo run --bin arena -- arena.toml --ticks=1200

mod boot_config;
mod demo;
mod input;
mod presenter;

use arena_audio::{ids, AudioLog};
use arena_game::{
    load_or_default, GridLevelProvider, JsonLevelProvider, LevelData, LevelProvider, SessionState, Simulation,
};
use arena_hud::HudState;

use crate::boot_config::{LevelFormat, RunConfig};
use crate::input::InputScript;
use crate::presenter::ConsolePresenter;

/// Outcome of one run
#[derive(Debug, Clone, PartialEq)]
struct RunSummary {
    ticks: u32,
    time: f32,
    state: SessionState,
    score: u32,
    health: f32,
    wave: usize,
    shots: usize,
    frames: u64,
    report: Option<String>,
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match RunConfig::load() {
        Ok(config) => config,
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    };
    config.print_summary();

    let level = build_level(&config);
    let summary = run(&config, level, |line| println!("{}", line));

    println!();
    println!("Session over after {} ticks ({:.1}s): {:?}", summary.ticks, summary.time, summary.state);
    println!(
        "  kills {} | health {:.0} | wave {} | shots {} | frames {}",
        summary.score, summary.health, summary.wave, summary.shots, summary.frames
    );
    if let Some(report) = &summary.report {
        println!("  last frame: {}", report);
    }
}

/// Level named by the config, or the demo arena
fn build_level(config: &RunConfig) -> LevelData {
    let (Some(name), Some(dir)) = (&config.run.level, &config.run.level_dir) else {
        return demo::arena();
    };
    let provider: Box<dyn LevelProvider> = match config.run.format {
        LevelFormat::Grid => Box::new(GridLevelProvider::new(dir)),
        LevelFormat::Json => Box::new(JsonLevelProvider::new(dir)),
    };
    load_or_default(provider.as_ref(), name)
}

/// Drive one session; `print` receives every new HUD message
fn run(config: &RunConfig, level: LevelData, mut print: impl FnMut(&str)) -> RunSummary {
    let mut sim = Simulation::new(config.sim.clone(), level, HudState::new(), AudioLog::new());
    let script = InputScript::demo();
    log::info!(
        "Input script loops every {:.1}s over {} segments",
        script.period(),
        script.segments().len()
    );
    let mut presenter = ConsolePresenter::new(config.run.report_every);
    let dt = config.run.dt;

    let mut printed = 0;
    let mut ticks = 0;
    while ticks < config.run.ticks {
        let input = script.input_at(sim.time());
        sim.tick(dt, &input);
        sim.ui_mut().update(dt);
        sim.render(&mut presenter);
        ticks += 1;

        let messages = sim.ui().message_log();
        for message in &messages[printed..] {
            print(&format!("[{:>6.1}s] {}", sim.time(), message));
        }
        printed = messages.len();

        if sim.state().is_terminal() {
            print(&sim.ui().status_line());
            break;
        }
    }

    let stats = presenter.stats();
    log::info!(
        "Presented {} frames (peak {} enemies, {} projectiles, {} tinted)",
        stats.frames,
        stats.peak_enemies,
        stats.peak_projectiles,
        stats.tinted_frames
    );

    let audio = sim.audio();
    RunSummary {
        ticks,
        time: sim.time(),
        state: sim.state(),
        score: sim.player().score,
        health: sim.player().health.current,
        wave: sim.waves().current_wave() + 1,
        shots: audio.count(ids::PISTOL) + audio.count(ids::MACHINE_GUN),
        frames: stats.frames,
        report: presenter.last_report().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_run(seed: u64) -> RunSummary {
        let mut config = RunConfig::default();
        config.run.ticks = 600;
        config.sim.seed = seed;
        run(&config, demo::arena(), |_| {})
    }

    #[test]
    fn test_demo_run() {
        let summary = short_run(1);
        assert!(summary.ticks > 0 && summary.ticks <= 600);
        assert_eq!(summary.frames, summary.ticks as u64);
        assert!(summary.shots > 0);
    }

    #[test]
    fn test_runs_are_reproducible() {
        assert_eq!(short_run(5), short_run(5));
    }

    #[test]
    fn test_missing_level_uses_fallback() {
        let mut config = RunConfig::default();
        config.run.level = Some("nowhere".to_string());
        config.run.level_dir = Some(std::env::temp_dir());
        assert_eq!(build_level(&config).name, "empty");

        config.run.level_dir = None;
        assert_eq!(build_level(&config).name, "demo");
    }
}
