//! The two mutations a player can issue during play: draw a prompt
//! (opening the next turn) and answer it (closing the turn).

use std::sync::Arc;

use prompt_pool::{pick_prompt, PromptKind};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::domain::{project, NewTurn, Phase, Room, Turn, ViewState};
use crate::errors::{ConflictKind, GameError, ValidationKind};
use crate::store::{GameStore, StoreError};

/// Result of an answer submission.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerOutcome {
    /// The open turn is now closed.
    Recorded(Turn),
    /// No open turn was addressable (closed concurrently). Nothing to do;
    /// the sync loop re-derives the correct phase on its own.
    NoOpenTurn,
}

pub struct TurnActions {
    store: Arc<dyn GameStore>,
    config: GameConfig,
}

impl TurnActions {
    pub fn new(store: Arc<dyn GameStore>, config: GameConfig) -> Self {
        Self { store, config }
    }

    /// Draw a prompt of `kind` and open the next turn for `player`.
    ///
    /// The turn number is the successor of the highest number in the log.
    /// Losing the insert race surfaces as a store conflict; the log is
    /// re-fetched and the insert retried exactly once before giving up.
    pub async fn choose_prompt(
        &self,
        room: &Room,
        player: &str,
        kind: PromptKind,
    ) -> Result<Turn, GameError> {
        let view = self.snapshot_view(room, player).await?;
        if view.phase != Phase::AwaitingPromptChoice {
            return Err(GameError::validation(
                ValidationKind::OutOfTurn,
                format!("it is not {player}'s turn to draw a prompt"),
            ));
        }

        let prompt = pick_prompt(room.game_mode, kind);
        match self
            .insert_turn(room, player, kind, prompt, view.next_turn_number())
            .await
        {
            Ok(turn) => Ok(turn),
            Err(StoreError::Conflict(detail)) => {
                warn!(
                    room_id = %room.id,
                    turn_number = view.next_turn_number(),
                    %detail,
                    "turn number conflict, re-fetching and retrying once"
                );
                let view = self.snapshot_view(room, player).await?;
                if view.phase != Phase::AwaitingPromptChoice {
                    // The partner's record made it in first and the game
                    // moved on; there is nothing valid left to insert.
                    return Err(GameError::validation(
                        ValidationKind::OutOfTurn,
                        format!("the game moved on while {player} was drawing"),
                    ));
                }
                match self
                    .insert_turn(room, player, kind, prompt, view.next_turn_number())
                    .await
                {
                    Ok(turn) => Ok(turn),
                    Err(StoreError::Conflict(detail)) => {
                        Err(GameError::conflict(ConflictKind::TurnNumberTaken, detail))
                    }
                    Err(err) => Err(err.into()),
                }
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Close the open turn with `answer`.
    pub async fn submit_answer(
        &self,
        room: &Room,
        player: &str,
        answer: &str,
    ) -> Result<AnswerOutcome, GameError> {
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(GameError::validation(
                ValidationKind::EmptyAnswer,
                "answer must not be empty",
            ));
        }

        let view = self.snapshot_view(room, player).await?;
        if view.phase != Phase::AwaitingAnswer {
            return Err(GameError::validation(
                ValidationKind::OutOfTurn,
                format!("{player} has no open prompt to answer"),
            ));
        }
        let Some(open) = view.open_turn else {
            // AwaitingAnswer implies an open turn; defensive fallthrough
            // for a snapshot race is the same no-op as a concurrent close.
            return Ok(AnswerOutcome::NoOpenTurn);
        };

        match self
            .store
            .update_turn_answer(open.id, answer, OffsetDateTime::now_utc())
            .await
        {
            Ok(turn) => {
                info!(
                    room_id = %room.id,
                    turn_number = turn.turn_number,
                    player,
                    "turn closed"
                );
                Ok(AnswerOutcome::Recorded(turn))
            }
            Err(StoreError::NotFound(detail)) => {
                // Closed from under us; the refreshed log is the truth.
                debug!(room_id = %room.id, player, %detail, "no open turn to close, ignoring");
                Ok(AnswerOutcome::NoOpenTurn)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn insert_turn(
        &self,
        room: &Room,
        player: &str,
        kind: PromptKind,
        prompt: &str,
        turn_number: u32,
    ) -> Result<Turn, StoreError> {
        let turn = self
            .store
            .insert_turn(NewTurn {
                room_id: room.id,
                turn_number,
                player_name: player.to_string(),
                kind,
                prompt: prompt.to_string(),
            })
            .await?;
        info!(
            room_id = %room.id,
            turn_number,
            player,
            kind = %kind,
            "turn opened"
        );
        Ok(turn)
    }

    async fn snapshot_view(&self, room: &Room, player: &str) -> Result<ViewState, GameError> {
        let turns = self.store.fetch_turns(room.id).await?;
        Ok(project(room, &turns, player, self.config.progress_target))
    }
}
