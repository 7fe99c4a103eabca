//! Demo harness: two clients sharing one in-process store.
//!
//! Creates a room, seats both players, runs a sync session per player and
//! plays a scripted game to full progress. Every move goes through the
//! same services a real frontend would call; the two sessions only learn
//! about each other's moves through the store's change feed.

use std::sync::Arc;

use client::config::GameConfig;
use client::domain::{GameMode, Phase, PromptKind, Room, ViewState};
use client::errors::{GameError, ValidationKind};
use client::services::{AnswerOutcome, RoomService, TurnActions};
use client::store::{GameStore, MemoryGameStore};
use client::sync::SyncSession;

mod telemetry;

const PLAYER_ONE: &str = "Alice";
const PLAYER_TWO: &str = "Bob";

#[tokio::main]
async fn main() {
    telemetry::init_tracing();

    if let Err(err) = run().await {
        eprintln!("❌ demo failed: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), GameError> {
    let config = GameConfig::from_env()?;
    let game_mode = std::env::var("CLIENT_GAME_MODE")
        .ok()
        .map(|raw| {
            raw.parse::<GameMode>()
                .map_err(|err| GameError::validation(ValidationKind::Config, err))
        })
        .transpose()?
        .unwrap_or(GameMode::Friendly);

    let store: Arc<dyn GameStore> = Arc::new(MemoryGameStore::new());
    let rooms = RoomService::new(store.clone());
    let actions = TurnActions::new(store.clone(), config);

    let room = rooms.create_room(PLAYER_ONE, game_mode).await?;
    println!(
        "🎲 room {} created ({} mode), waiting in the lobby",
        room.room_code, room.game_mode
    );
    rooms.join_room(&room.room_code, PLAYER_TWO).await?;
    let room = rooms.start_game(room.id).await?;
    println!("✅ {} joined, game on", PLAYER_TWO);

    let alice = SyncSession::start(store.clone(), room.id, PLAYER_ONE, config).await?;
    let bob = SyncSession::start(store.clone(), room.id, PLAYER_TWO, config).await?;

    let mut alice_view = alice.subscribe_view();
    let mut bob_view = bob.subscribe_view();
    let mut answers = 0u32;

    loop {
        let for_alice = alice_view.borrow_and_update().clone();
        if for_alice.progress >= 100 {
            break;
        }
        let for_bob = bob_view.borrow_and_update().clone();

        let acted = act_once(&actions, &room, PLAYER_ONE, &for_alice, &mut answers).await?
            || act_once(&actions, &room, PLAYER_TWO, &for_bob, &mut answers).await?;
        if acted {
            continue;
        }

        // Nothing actionable from either chair; wait for a session to
        // publish a fresher view.
        tokio::select! {
            changed = alice_view.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            changed = bob_view.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }

    let finale = alice.current_view();
    alice.stop().await;
    bob.stop().await;

    println!(
        "💯 progress {}% after {} answered turns",
        finale.progress,
        finale.history.len()
    );
    match serde_json::to_string_pretty(&finale.history) {
        Ok(transcript) => println!("{transcript}"),
        Err(err) => eprintln!("could not render transcript: {err}"),
    }
    Ok(())
}

/// Let `player` act on their current view, if it says they may.
///
/// Views lag the store, so a rejected out-of-turn move is not an error
/// here: the next published view straightens things out.
async fn act_once(
    actions: &TurnActions,
    room: &Room,
    player: &str,
    view: &ViewState,
    answers: &mut u32,
) -> Result<bool, GameError> {
    match view.phase {
        Phase::AwaitingPromptChoice => {
            let kind = if rand::random::<bool>() {
                PromptKind::Truth
            } else {
                PromptKind::Dare
            };
            match actions.choose_prompt(room, player, kind).await {
                Ok(turn) => {
                    println!("  {player} drew {} #{}: {}", turn.kind, turn.turn_number, turn.prompt);
                    Ok(true)
                }
                Err(GameError::Validation(ValidationKind::OutOfTurn, _)) => Ok(false),
                Err(err) => Err(err),
            }
        }
        Phase::AwaitingAnswer => {
            *answers += 1;
            let text = format!("{player}'s answer #{answers}");
            match actions.submit_answer(room, player, &text).await {
                Ok(AnswerOutcome::Recorded(turn)) => {
                    println!("  {player} answered #{}", turn.turn_number);
                    Ok(true)
                }
                Ok(AnswerOutcome::NoOpenTurn) => Ok(false),
                Err(GameError::Validation(ValidationKind::OutOfTurn, _)) => Ok(false),
                Err(err) => Err(err),
            }
        }
        Phase::WaitingOnOther | Phase::Waiting => Ok(false),
    }
}
