//! Boundary to the shared record store.
//!
//! Two clients never talk to each other; every observation and mutation
//! goes through this trait, and all coordination rides on the store's
//! change feed. Notifications are advisory: any event means "something
//! touching this room changed, re-derive", nothing more. The hosted
//! backend sits behind this trait and is not implemented here;
//! [`MemoryGameStore`] is the in-process implementation used by tests and
//! the demo binary.

pub mod memory;

pub use memory::MemoryGameStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::domain::{NewTurn, Room, Turn};

/// Transport-level store failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
}

/// Advisory change notification.
///
/// Consumers must not trust the payload for anything beyond "re-derive
/// now"; the fields exist for logging and diagnostics only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeEvent {
    RoomChanged { room_id: Uuid },
    TurnInserted { room_id: Uuid, turn_number: u32 },
    TurnUpdated { room_id: Uuid, turn_number: u32 },
}

/// Live subscription to one room's change feed.
///
/// The token addresses the subscription for [`GameStore::unsubscribe`];
/// the receiver carries the advisory events.
pub struct StoreSubscription {
    pub token: Uuid,
    pub room_id: Uuid,
    pub receiver: broadcast::Receiver<ChangeEvent>,
}

/// The record store both clients replicate from.
#[async_trait]
pub trait GameStore: Send + Sync {
    async fn fetch_room(&self, room_id: Uuid) -> Result<Option<Room>, StoreError>;

    async fn fetch_room_by_code(&self, room_code: &str) -> Result<Option<Room>, StoreError>;

    async fn insert_room(&self, room: Room) -> Result<Room, StoreError>;

    /// Claim the second seat. Conflict if the seat is taken or the room
    /// already started.
    async fn claim_seat(&self, room_id: Uuid, player2: &str) -> Result<Room, StoreError>;

    /// Flip a fully-seated room to playing. Conflict while the second
    /// seat is empty.
    async fn mark_playing(
        &self,
        room_id: Uuid,
        started_at: OffsetDateTime,
    ) -> Result<Room, StoreError>;

    /// All turns of a room, by turn number ascending.
    async fn fetch_turns(&self, room_id: Uuid) -> Result<Vec<Turn>, StoreError>;

    /// Insert an open turn. Conflict on a duplicate `(room, turn_number)`.
    async fn insert_turn(&self, turn: NewTurn) -> Result<Turn, StoreError>;

    /// Close an open turn. NotFound if the turn is missing or already
    /// closed.
    async fn update_turn_answer(
        &self,
        turn_id: Uuid,
        answer: &str,
        answered_at: OffsetDateTime,
    ) -> Result<Turn, StoreError>;

    /// Subscribe to every insert/update touching `room_id` (the room row
    /// or its turns).
    async fn subscribe(&self, room_id: Uuid) -> Result<StoreSubscription, StoreError>;

    async fn unsubscribe(&self, token: Uuid);
}
