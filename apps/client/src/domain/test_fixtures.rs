//! Builders shared by the domain test modules.

use prompt_pool::{GameMode, PromptKind};
use time::macros::datetime;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use super::model::{Room, RoomStatus, Turn};

pub(crate) const BASE_TIME: OffsetDateTime = datetime!(2024-06-01 12:00 UTC);

pub(crate) fn playing_room() -> Room {
    Room {
        id: Uuid::new_v4(),
        room_code: "ABC234".to_string(),
        game_mode: GameMode::Friendly,
        player1: "Alice".to_string(),
        player2: Some("Bob".to_string()),
        status: RoomStatus::Playing,
        created_at: BASE_TIME,
        started_at: Some(BASE_TIME),
    }
}

pub(crate) fn waiting_room() -> Room {
    Room {
        player2: None,
        status: RoomStatus::Waiting,
        started_at: None,
        ..playing_room()
    }
}

pub(crate) fn open_turn(room: &Room, turn_number: u32, player: &str) -> Turn {
    Turn {
        id: Uuid::new_v4(),
        room_id: room.id,
        turn_number,
        player_name: player.to_string(),
        kind: PromptKind::Truth,
        prompt: format!("prompt #{turn_number}"),
        answer: None,
        answered_at: None,
    }
}

/// A closed turn answered `answered_secs` seconds after `BASE_TIME`.
pub(crate) fn closed_turn(
    room: &Room,
    turn_number: u32,
    player: &str,
    answer: &str,
    answered_secs: i64,
) -> Turn {
    Turn {
        answer: Some(answer.to_string()),
        answered_at: Some(BASE_TIME + Duration::seconds(answered_secs)),
        ..open_turn(room, turn_number, player)
    }
}

/// An alternating, fully valid log: `total` turns starting with `player1`,
/// all closed except the last when `last_open` is set.
pub(crate) fn alternating_log(room: &Room, total: u32, last_open: bool) -> Vec<Turn> {
    let second = room.player2.clone().unwrap_or_default();
    (1..=total)
        .map(|n| {
            let player = if n % 2 == 1 {
                room.player1.as_str()
            } else {
                second.as_str()
            };
            if last_open && n == total {
                open_turn(room, n, player)
            } else {
                closed_turn(room, n, player, "done", n as i64)
            }
        })
        .collect()
}
