//! Scripted input for headless runs
//!
//! An [`InputScript`] is a list of timed segments. Each segment holds one
//! [`PlayerInput`] from its start time until the next segment begins; the
//! script loops once it runs out.

use arena_game::PlayerInput;

/// One timed stretch of input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSegment {
    /// Seconds the segment lasts
    pub duration: f32,
    /// Input held for the whole segment
    pub input: PlayerInput,
}

impl InputSegment {
    /// Create a segment
    pub fn new(duration: f32, input: PlayerInput) -> Self {
        Self { duration, input }
    }
}

/// Looping input timeline
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    segments: Vec<InputSegment>,
    period: f32,
}

impl InputScript {
    /// Create an empty script (always idle)
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment
    pub fn then(mut self, duration: f32, input: PlayerInput) -> Self {
        let duration = duration.max(0.0);
        self.segments.push(InputSegment::new(duration, input));
        self.period += duration;
        self
    }

    /// Patrol loop: sweep and fire, strafe, jump, swap weapons
    pub fn demo() -> Self {
        let sweep = |yaw_delta: f32| PlayerInput {
            yaw_delta,
            ..PlayerInput::idle().with_fire()
        };
        let strafe_left = PlayerInput {
            left: true,
            yaw_delta: 0.02,
            ..PlayerInput::idle().with_fire()
        };
        let strafe_right = PlayerInput {
            right: true,
            yaw_delta: -0.02,
            ..PlayerInput::idle().with_fire()
        };
        let next_weapon = PlayerInput {
            switch_weapon: 1,
            ..PlayerInput::idle()
        };

        Self::new()
            .then(0.5, PlayerInput::idle().with_interact())
            .then(3.0, sweep(0.03))
            .then(1.5, strafe_left)
            .then(0.1, next_weapon)
            .then(3.0, sweep(-0.03))
            .then(1.5, strafe_right)
            .then(0.3, PlayerInput::forward().with_jump())
            .then(0.1, next_weapon)
            .then(1.0, PlayerInput { backward: true, ..PlayerInput::idle() })
    }

    /// Input for simulation time `time`
    pub fn input_at(&self, time: f32) -> PlayerInput {
        if self.period <= 0.0 {
            return PlayerInput::idle();
        }
        let mut local = time.max(0.0) % self.period;
        for segment in &self.segments {
            if local < segment.duration {
                return segment.input;
            }
            local -= segment.duration;
        }
        self.segments.last().map_or_else(PlayerInput::idle, |segment| segment.input)
    }

    /// Length of one loop in seconds
    pub fn period(&self) -> f32 {
        self.period
    }

    /// Segments in order
    pub fn segments(&self) -> &[InputSegment] {
        &self.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_script_is_idle() {
        assert_eq!(InputScript::new().input_at(12.0), PlayerInput::idle());
    }

    #[test]
    fn test_segments_and_looping() {
        let script = InputScript::new()
            .then(1.0, PlayerInput::forward())
            .then(2.0, PlayerInput::idle().with_fire());
        assert_eq!(script.period(), 3.0);

        assert!(script.input_at(0.5).forward);
        assert!(script.input_at(1.5).fire);
        assert!(script.input_at(3.5).forward);
        assert!(script.input_at(5.0).fire);
    }

    #[test]
    fn test_demo_starts_with_interact() {
        let script = InputScript::demo();
        assert!(script.input_at(0.0).interact);
        assert!(script.segments().iter().any(|s| s.input.switch_weapon != 0));
        assert!(script.period() > 10.0);
    }
}
