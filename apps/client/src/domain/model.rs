//! Replicated records shared through the store.
//!
//! Both clients observe the same rows; nothing here is local state. The
//! store owns persistence, the sync loop owns the cached copy, and the
//! cached copy is always rebuilt from a full snapshot.

use prompt_pool::{GameMode, PromptKind};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Room lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    /// Created; the second seat may still be empty.
    Waiting,
    /// Both seats filled and the host started the game.
    Playing,
}

/// A game room shared by exactly two players.
///
/// Once `Playing`, both player names are non-empty and immutable for the
/// room's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    /// Short code players exchange out of band to find each other.
    pub room_code: String,
    pub game_mode: GameMode,
    pub player1: String,
    /// Empty until the second player joins.
    pub player2: Option<String>,
    pub status: RoomStatus,
    pub created_at: OffsetDateTime,
    pub started_at: Option<OffsetDateTime>,
}

impl Room {
    /// Whether `player` holds one of the two seats.
    pub fn holds_seat(&self, player: &str) -> bool {
        self.player1 == player || self.player2.as_deref() == Some(player)
    }

    /// The seat opposite `player`, if `player` holds a seat.
    pub fn partner_of(&self, player: &str) -> Option<&str> {
        if self.player1 == player {
            self.player2.as_deref()
        } else if self.player2.as_deref() == Some(player) {
            Some(self.player1.as_str())
        } else {
            None
        }
    }
}

/// One prompt-and-response unit authored by one player.
///
/// Open while `answer` is absent, closed once it is set. Turn numbers are
/// 1-based, gapless, and assigned by the creator at insert time; turns are
/// never deleted or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub id: Uuid,
    pub room_id: Uuid,
    pub turn_number: u32,
    pub player_name: String,
    pub kind: PromptKind,
    pub prompt: String,
    pub answer: Option<String>,
    pub answered_at: Option<OffsetDateTime>,
}

impl Turn {
    pub fn is_open(&self) -> bool {
        self.answer.is_none()
    }
}

/// Insert payload for a new (open) turn.
#[derive(Debug, Clone)]
pub struct NewTurn {
    pub room_id: Uuid,
    pub turn_number: u32,
    pub player_name: String,
    pub kind: PromptKind,
    pub prompt: String,
}
