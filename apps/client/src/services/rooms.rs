//! Room lifecycle operations: create, join, start, and the lobby wait.

use std::sync::Arc;

use prompt_pool::GameMode;
use time::OffsetDateTime;
use tokio::sync::broadcast;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{Room, RoomStatus};
use crate::errors::{ConflictKind, GameError, NotFoundKind, StoreKind, ValidationKind};
use crate::store::{ChangeEvent, GameStore, StoreError, StoreSubscription};
use crate::utils::room_code::generate_room_code;

pub struct RoomService {
    store: Arc<dyn GameStore>,
}

impl RoomService {
    pub fn new(store: Arc<dyn GameStore>) -> Self {
        Self { store }
    }

    /// Create a room with the caller in the first seat.
    pub async fn create_room(&self, player1: &str, game_mode: GameMode) -> Result<Room, GameError> {
        let player1 = player1.trim();
        if player1.is_empty() {
            return Err(GameError::validation(
                ValidationKind::EmptyName,
                "player name must not be empty",
            ));
        }

        let room = Room {
            id: Uuid::new_v4(),
            room_code: generate_room_code(),
            game_mode,
            player1: player1.to_string(),
            player2: None,
            status: RoomStatus::Waiting,
            created_at: OffsetDateTime::now_utc(),
            started_at: None,
        };
        let room = self.store.insert_room(room).await?;
        info!(
            room_id = %room.id,
            room_code = %room.room_code,
            game_mode = %room.game_mode,
            "room created"
        );
        Ok(room)
    }

    /// Take the second seat of a waiting room, addressed by its code.
    pub async fn join_room(&self, room_code: &str, player2: &str) -> Result<Room, GameError> {
        let player2 = player2.trim();
        if player2.is_empty() {
            return Err(GameError::validation(
                ValidationKind::EmptyName,
                "player name must not be empty",
            ));
        }
        let code = room_code.trim().to_uppercase();

        let room = self
            .store
            .fetch_room_by_code(&code)
            .await?
            .ok_or_else(|| {
                GameError::not_found(NotFoundKind::Room, format!("no room with code {code}"))
            })?;
        if room.status != RoomStatus::Waiting {
            return Err(GameError::conflict(
                ConflictKind::RoomAlreadyStarted,
                "room already started",
            ));
        }
        if room.player2.is_some() {
            return Err(GameError::conflict(ConflictKind::RoomFull, "room is full"));
        }

        // The store re-checks atomically; losing the race to another
        // joiner surfaces the same way as finding the seat taken.
        let joined = match self.store.claim_seat(room.id, player2).await {
            Ok(room) => room,
            Err(StoreError::Conflict(detail)) => {
                return Err(GameError::conflict(ConflictKind::RoomFull, detail));
            }
            Err(err) => return Err(err.into()),
        };
        info!(room_id = %joined.id, player2, "second seat claimed");
        Ok(joined)
    }

    /// Flip a fully-seated room to playing. Idempotent for a room that is
    /// already underway.
    pub async fn start_game(&self, room_id: Uuid) -> Result<Room, GameError> {
        let room = self.require_room(room_id).await?;
        if room.player2.is_none() {
            return Err(GameError::validation(
                ValidationKind::MissingPartner,
                "waiting for the second player to join",
            ));
        }
        if room.status == RoomStatus::Playing {
            return Ok(room);
        }

        let started = self
            .store
            .mark_playing(room_id, OffsetDateTime::now_utc())
            .await?;
        info!(room_id = %started.id, "game started");
        Ok(started)
    }

    /// Lobby behavior: block until the room flips to playing.
    ///
    /// Change signals are advisory, so the room is re-fetched on every
    /// event rather than read out of the payload.
    pub async fn wait_until_playing(&self, room_id: Uuid) -> Result<Room, GameError> {
        let StoreSubscription {
            token,
            mut receiver,
            ..
        } = self.store.subscribe(room_id).await?;
        let outcome = self.poll_until_playing(room_id, &mut receiver).await;
        self.store.unsubscribe(token).await;
        outcome
    }

    async fn poll_until_playing(
        &self,
        room_id: Uuid,
        receiver: &mut broadcast::Receiver<ChangeEvent>,
    ) -> Result<Room, GameError> {
        loop {
            let room = self.require_room(room_id).await?;
            if room.status == RoomStatus::Playing {
                return Ok(room);
            }
            debug!(%room_id, "room not started yet, waiting for a change signal");
            match receiver.recv().await {
                Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => {
                    return Err(GameError::store(
                        StoreKind::Other("change feed closed".into()),
                        format!("lost the change feed while waiting on room {room_id}"),
                    ));
                }
            }
        }
    }

    async fn require_room(&self, room_id: Uuid) -> Result<Room, GameError> {
        self.store.fetch_room(room_id).await?.ok_or_else(|| {
            GameError::not_found(NotFoundKind::Room, format!("room {room_id} does not exist"))
        })
    }
}
