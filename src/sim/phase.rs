//! Game phase state machine
//!
//! All phase transitions live in one table (`GamePhase::on`). Input and
//! simulation only raise triggers; they never assign a phase directly.

use serde::{Deserialize, Serialize};

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title art, waiting for any key
    #[default]
    StartScreen,
    /// A round is in progress
    Running,
    /// Ball sunk, waiting for Return
    Completed,
    /// Terminal; the main loop stops
    Exit,
}

/// Something that may move the game to another phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Any key on the start screen
    Start,
    /// Capture animation finished
    BallSunk,
    /// Confirm on the completed screen
    Restart,
    /// Window closed or Escape pressed
    Quit,
}

impl GamePhase {
    /// Transition table. `None` means the trigger is not valid here.
    pub fn on(self, trigger: Trigger) -> Option<GamePhase> {
        use GamePhase::*;
        match (self, trigger) {
            (Exit, _) => None,
            (_, Trigger::Quit) => Some(Exit),
            (StartScreen, Trigger::Start) => Some(Running),
            (Running, Trigger::BallSunk) => Some(Completed),
            (Completed, Trigger::Restart) => Some(Running),
            _ => None,
        }
    }

    /// Whether the ball simulator runs in this phase
    pub fn simulates(self) -> bool {
        self == GamePhase::Running
    }

    pub fn is_terminal(self) -> bool {
        self == GamePhase::Exit
    }
}
