//! The derived, renderable summary of a game snapshot.

use serde::Serialize;

use super::model::Turn;

/// What the local player should be doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// It is the local player's turn and no prompt has been drawn yet.
    AwaitingPromptChoice,
    /// The local player drew a prompt and still owes an answer.
    AwaitingAnswer,
    /// The partner drew a prompt and has not answered it yet.
    WaitingOnOther,
    /// Nothing to do: pre-start, the partner is picking, or the viewer
    /// holds no seat.
    Waiting,
}

/// Summary derived from one full snapshot of the turn log.
///
/// Rebuilt from scratch on every projection; it carries no state of its
/// own, so two clients holding the same snapshot render the same thing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    /// The local player's phase.
    pub phase: Phase,
    /// The player expected to act next, when the game is underway.
    pub actor: Option<String>,
    /// The single open turn, when one exists.
    pub open_turn: Option<Turn>,
    /// Closed turns, newest first.
    pub history: Vec<Turn>,
    /// Closed-turn progress scaled to 0..=100.
    pub progress: u8,
    /// Highest turn number in the snapshot; 0 for an empty log.
    pub max_turn_number: u32,
}

impl ViewState {
    /// The number a newly created turn must carry.
    pub fn next_turn_number(&self) -> u32 {
        self.max_turn_number + 1
    }
}
