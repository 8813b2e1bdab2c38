//! Console Presenter - reports frames through the log

use arena_game::{FrameSnapshot, Presenter};

/// Frame counters kept between reports
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Frames presented
    pub frames: u64,
    /// Most enemies visible in one frame
    pub peak_enemies: usize,
    /// Most projectiles in flight in one frame
    pub peak_projectiles: usize,
    /// Frames drawn with a world tint
    pub tinted_frames: u64,
}

/// Presenter that logs a one-line frame summary at a fixed interval
#[derive(Debug, Clone)]
pub struct ConsolePresenter {
    report_every: f32,
    next_report: f32,
    stats: FrameStats,
    last_report: Option<String>,
}

impl ConsolePresenter {
    /// Create a presenter reporting every `report_every` seconds of simulation time
    pub fn new(report_every: f32) -> Self {
        Self {
            report_every,
            next_report: report_every,
            stats: FrameStats::default(),
            last_report: None,
        }
    }

    /// Counters so far
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Most recent report line
    pub fn last_report(&self) -> Option<&str> {
        self.last_report.as_deref()
    }

    fn describe(frame: &FrameSnapshot) -> String {
        let open_doors = frame.doors.iter().filter(|d| d.is_open).count();
        let flashing = frame.enemies.iter().filter(|e| e.hit_flash).count();
        format!(
            "t={:.1}s pos=({:.1}, {:.1}, {:.1}) hp={:.0} enemies={} ({} hit) projectiles={} doors open={}/{} items={}",
            frame.time,
            frame.player.position.x,
            frame.player.position.y,
            frame.player.position.z,
            frame.player.health,
            frame.enemies.len(),
            flashing,
            frame.projectiles.len(),
            open_doors,
            frame.doors.len(),
            frame.pickups.len()
        )
    }
}

impl Presenter for ConsolePresenter {
    fn render(&mut self, frame: &FrameSnapshot) {
        self.stats.frames += 1;
        self.stats.peak_enemies = self.stats.peak_enemies.max(frame.enemies.len());
        self.stats.peak_projectiles = self.stats.peak_projectiles.max(frame.projectiles.len());
        if frame.world_tint.is_some() {
            self.stats.tinted_frames += 1;
        }

        if self.report_every > 0.0 && frame.time >= self.next_report {
            let line = Self::describe(frame);
            log::info!("{}", line);
            self.last_report = Some(line);
            while self.next_report <= frame.time {
                self.next_report += self.report_every;
            }
        }
    }
}
