//! In-process store used by tests and the demo binary.
//!
//! Fan-out mirrors the hosted store's realtime channel: one broadcast
//! channel per room, and every insert/update publishes an advisory
//! envelope on it. Rows live in dashmaps keyed by id; subscription tokens
//! are tracked so release is observable.

use async_trait::async_trait;
use dashmap::DashMap;
use time::OffsetDateTime;
use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

use super::{ChangeEvent, GameStore, StoreError, StoreSubscription};
use crate::domain::{NewTurn, Room, RoomStatus, Turn};

const CHANNEL_CAPACITY: usize = 64;

#[derive(Default)]
pub struct MemoryGameStore {
    rooms: DashMap<Uuid, Room>,
    /// Turn logs keyed by room id, in insert order.
    turns: DashMap<Uuid, Vec<Turn>>,
    /// Turn id -> owning room, for single-row updates.
    turn_rooms: DashMap<Uuid, Uuid>,
    channels: DashMap<Uuid, broadcast::Sender<ChangeEvent>>,
    /// Subscription token -> room id.
    subscribers: DashMap<Uuid, Uuid>,
}

impl MemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live subscription count for a room (diagnostics and tests).
    pub fn subscriber_count(&self, room_id: Uuid) -> usize {
        self.subscribers
            .iter()
            .filter(|entry| *entry.value() == room_id)
            .count()
    }

    fn notify(&self, room_id: Uuid, event: ChangeEvent) {
        if let Some(sender) = self.channels.get(&room_id) {
            // Err just means nobody is listening right now.
            let _ = sender.send(event);
        }
    }
}

#[async_trait]
impl GameStore for MemoryGameStore {
    async fn fetch_room(&self, room_id: Uuid) -> Result<Option<Room>, StoreError> {
        Ok(self.rooms.get(&room_id).map(|room| room.clone()))
    }

    async fn fetch_room_by_code(&self, room_code: &str) -> Result<Option<Room>, StoreError> {
        Ok(self
            .rooms
            .iter()
            .find(|room| room.room_code == room_code)
            .map(|room| room.clone()))
    }

    async fn insert_room(&self, room: Room) -> Result<Room, StoreError> {
        if self.rooms.contains_key(&room.id) {
            return Err(StoreError::Conflict(format!(
                "room {} already exists",
                room.id
            )));
        }
        self.turns.insert(room.id, Vec::new());
        self.rooms.insert(room.id, room.clone());
        Ok(room)
    }

    async fn claim_seat(&self, room_id: Uuid, player2: &str) -> Result<Room, StoreError> {
        let room = {
            let mut entry = self
                .rooms
                .get_mut(&room_id)
                .ok_or_else(|| StoreError::NotFound(format!("room {room_id}")))?;
            if entry.status != RoomStatus::Waiting {
                return Err(StoreError::Conflict("room already started".into()));
            }
            if entry.player2.is_some() {
                return Err(StoreError::Conflict("second seat is taken".into()));
            }
            entry.player2 = Some(player2.to_string());
            entry.clone()
        };
        self.notify(room_id, ChangeEvent::RoomChanged { room_id });
        Ok(room)
    }

    async fn mark_playing(
        &self,
        room_id: Uuid,
        started_at: OffsetDateTime,
    ) -> Result<Room, StoreError> {
        let room = {
            let mut entry = self
                .rooms
                .get_mut(&room_id)
                .ok_or_else(|| StoreError::NotFound(format!("room {room_id}")))?;
            if entry.player2.is_none() {
                // A playing room always has both names set.
                return Err(StoreError::Conflict("second seat is empty".into()));
            }
            entry.status = RoomStatus::Playing;
            entry.started_at = Some(started_at);
            entry.clone()
        };
        self.notify(room_id, ChangeEvent::RoomChanged { room_id });
        Ok(room)
    }

    async fn fetch_turns(&self, room_id: Uuid) -> Result<Vec<Turn>, StoreError> {
        let mut turns = self
            .turns
            .get(&room_id)
            .map(|log| log.clone())
            .unwrap_or_default();
        turns.sort_by_key(|turn| turn.turn_number);
        Ok(turns)
    }

    async fn insert_turn(&self, new_turn: NewTurn) -> Result<Turn, StoreError> {
        let turn = {
            let mut log = self
                .turns
                .get_mut(&new_turn.room_id)
                .ok_or_else(|| StoreError::NotFound(format!("room {}", new_turn.room_id)))?;
            if log
                .iter()
                .any(|turn| turn.turn_number == new_turn.turn_number)
            {
                return Err(StoreError::Conflict(format!(
                    "turn number {} already exists in room {}",
                    new_turn.turn_number, new_turn.room_id
                )));
            }
            let turn = Turn {
                id: Uuid::new_v4(),
                room_id: new_turn.room_id,
                turn_number: new_turn.turn_number,
                player_name: new_turn.player_name,
                kind: new_turn.kind,
                prompt: new_turn.prompt,
                answer: None,
                answered_at: None,
            };
            log.push(turn.clone());
            turn
        };
        self.turn_rooms.insert(turn.id, turn.room_id);
        self.notify(
            turn.room_id,
            ChangeEvent::TurnInserted {
                room_id: turn.room_id,
                turn_number: turn.turn_number,
            },
        );
        Ok(turn)
    }

    async fn update_turn_answer(
        &self,
        turn_id: Uuid,
        answer: &str,
        answered_at: OffsetDateTime,
    ) -> Result<Turn, StoreError> {
        let room_id = *self
            .turn_rooms
            .get(&turn_id)
            .ok_or_else(|| StoreError::NotFound(format!("turn {turn_id}")))?;
        let updated = {
            let mut log = self
                .turns
                .get_mut(&room_id)
                .ok_or_else(|| StoreError::NotFound(format!("room {room_id}")))?;
            let turn = log
                .iter_mut()
                .find(|turn| turn.id == turn_id)
                .ok_or_else(|| StoreError::NotFound(format!("turn {turn_id}")))?;
            if turn.answer.is_some() {
                // An already-closed turn is no longer addressable.
                return Err(StoreError::NotFound(format!(
                    "turn {turn_id} is already closed"
                )));
            }
            turn.answer = Some(answer.to_string());
            turn.answered_at = Some(answered_at);
            turn.clone()
        };
        self.notify(
            room_id,
            ChangeEvent::TurnUpdated {
                room_id,
                turn_number: updated.turn_number,
            },
        );
        Ok(updated)
    }

    async fn subscribe(&self, room_id: Uuid) -> Result<StoreSubscription, StoreError> {
        let sender = self
            .channels
            .entry(room_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .clone();
        let receiver = sender.subscribe();
        let token = Uuid::new_v4();
        self.subscribers.insert(token, room_id);
        debug!(%room_id, %token, "subscription registered");
        Ok(StoreSubscription {
            token,
            room_id,
            receiver,
        })
    }

    async fn unsubscribe(&self, token: Uuid) {
        if let Some((_, room_id)) = self.subscribers.remove(&token) {
            debug!(%room_id, %token, "subscription released");
        }
    }
}
