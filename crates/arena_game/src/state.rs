//! Session state machine

use serde::{Deserialize, Serialize};

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SessionState {
    /// Waves in progress
    #[default]
    Playing,
    /// Every wave cleared; the arena stays live
    Victory,
    /// The player died; terminal
    GameOver,
}

impl SessionState {
    /// Check if the world still advances
    pub fn is_running(&self) -> bool {
        !matches!(self, Self::GameOver)
    }

    /// Check if player input is processed
    pub fn accepts_gameplay_input(&self) -> bool {
        matches!(self, Self::Playing | Self::Victory)
    }

    /// Check if no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::GameOver)
    }
}

/// A recorded state change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateTransition {
    /// Previous state
    pub from: SessionState,
    /// New state
    pub to: SessionState,
    /// Simulation time of the change
    pub at: f32,
}

/// Current session state plus its history
#[derive(Debug, Clone, Default)]
pub struct SessionStateMachine {
    current: SessionState,
    history: Vec<StateTransition>,
}

impl SessionStateMachine {
    /// Start in `Playing`
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn current(&self) -> SessionState {
        self.current
    }

    /// Move to `to`; ignored when already there or the current state is terminal
    pub fn transition(&mut self, to: SessionState, at: f32) -> bool {
        if self.current == to || self.current.is_terminal() {
            return false;
        }
        log::info!("Session {:?} -> {:?} at {:.2}s", self.current, to, at);
        self.history.push(StateTransition {
            from: self.current,
            to,
            at,
        });
        self.current = to;
        true
    }

    /// Every transition so far
    pub fn history(&self) -> &[StateTransition] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_properties() {
        assert!(SessionState::Playing.accepts_gameplay_input());
        assert!(SessionState::Victory.is_running());
        assert!(!SessionState::GameOver.is_running());
        assert!(SessionState::GameOver.is_terminal());
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut machine = SessionStateMachine::new();
        assert!(machine.transition(SessionState::Victory, 10.0));
        assert!(!machine.transition(SessionState::Victory, 11.0));
        assert!(machine.transition(SessionState::GameOver, 12.0));
        assert!(!machine.transition(SessionState::Playing, 13.0));

        assert_eq!(machine.current(), SessionState::GameOver);
        assert_eq!(machine.history().len(), 2);
        assert_eq!(machine.history()[0].from, SessionState::Playing);
    }
}
