//! Projection of a replicated turn log into a [`ViewState`].
//!
//! This is the algorithmic core of the client and it is deliberately pure:
//! full snapshot in, view out, no I/O. The sync loop decides *when* to
//! re-derive; this module decides *what* the snapshot means.

use tracing::debug;

use super::model::{Room, RoomStatus, Turn};
use super::view::{Phase, ViewState};

/// Sort a replicated turn log by turn number and collapse duplicates.
///
/// Network delivery order is not causal order, so arrival order is never
/// trusted. When two records share a turn number (a racing double insert)
/// the canonical record is the one with the lower `answered_at`; an
/// answered record displaces an open one, and otherwise the earlier-seen
/// record wins. The loser is a harmless duplicate: dropped here, never
/// surfaced to the renderer.
pub fn normalize_turns(turns: &[Turn]) -> Vec<Turn> {
    let mut canonical: Vec<Turn> = Vec::with_capacity(turns.len());
    for turn in turns {
        match canonical
            .iter_mut()
            .find(|kept| kept.turn_number == turn.turn_number)
        {
            None => canonical.push(turn.clone()),
            Some(kept) if displaces(turn, kept) => {
                debug!(
                    turn_number = turn.turn_number,
                    kept = %turn.id,
                    dropped = %kept.id,
                    "duplicate turn number, replacing canonical record"
                );
                *kept = turn.clone();
            }
            Some(_) => {
                debug!(
                    turn_number = turn.turn_number,
                    dropped = %turn.id,
                    "duplicate turn number, ignoring record"
                );
            }
        }
    }
    canonical.sort_by_key(|turn| turn.turn_number);
    canonical
}

// A later-seen record displaces the canonical one only by answering
// strictly earlier. Open challengers never displace.
fn displaces(challenger: &Turn, canonical: &Turn) -> bool {
    match (challenger.answered_at, canonical.answered_at) {
        (Some(challenger_at), Some(canonical_at)) => challenger_at < canonical_at,
        (Some(_), None) => true,
        _ => false,
    }
}

/// Derive the local player's view from a full snapshot.
///
/// Total over arbitrary replicated input: odd snapshots (viewer without a
/// seat, room not started, duplicate or unordered turns) degrade to
/// [`Phase::Waiting`] instead of panicking.
///
/// The rules, in order:
/// - empty log: `player1` draws the first prompt;
/// - last turn open: its author owes an answer, the partner waits;
/// - last turn closed: the *other* seat acts next (strict alternation).
pub fn project(room: &Room, turns: &[Turn], local_player: &str, progress_target: u32) -> ViewState {
    let turns = normalize_turns(turns);

    let mut history: Vec<Turn> = turns.iter().filter(|t| !t.is_open()).cloned().collect();
    history.reverse();
    let progress = progress_percent(history.len(), progress_target);
    let max_turn_number = turns.last().map(|t| t.turn_number).unwrap_or(0);

    let seated = room.status == RoomStatus::Playing
        && room.player2.is_some()
        && room.holds_seat(local_player);
    if !seated {
        return ViewState {
            phase: Phase::Waiting,
            actor: None,
            open_turn: None,
            history,
            progress,
            max_turn_number,
        };
    }

    match turns.last() {
        // Nobody has played yet: the room creator opens the game.
        None => {
            let phase = if room.player1 == local_player {
                Phase::AwaitingPromptChoice
            } else {
                Phase::Waiting
            };
            ViewState {
                phase,
                actor: Some(room.player1.clone()),
                open_turn: None,
                history,
                progress,
                max_turn_number,
            }
        }
        Some(last) if last.is_open() => {
            let phase = if last.player_name == local_player {
                Phase::AwaitingAnswer
            } else {
                Phase::WaitingOnOther
            };
            ViewState {
                phase,
                actor: Some(last.player_name.clone()),
                open_turn: Some(last.clone()),
                history,
                progress,
                max_turn_number,
            }
        }
        Some(last) => {
            // Strict alternation: whoever did not author the last closed
            // turn draws next. A corrupt author name falls back to the
            // room creator rather than wedging the game.
            let next = room
                .partner_of(&last.player_name)
                .unwrap_or(room.player1.as_str())
                .to_string();
            let phase = if next == local_player {
                Phase::AwaitingPromptChoice
            } else {
                Phase::Waiting
            };
            ViewState {
                phase,
                actor: Some(next),
                open_turn: None,
                history,
                progress,
                max_turn_number,
            }
        }
    }
}

/// Scale the closed-turn count to 0..=100 against the configured target.
///
/// Derived on every call, never stored.
pub fn progress_percent(closed_turns: usize, target: u32) -> u8 {
    if target == 0 {
        // Config rejects a zero target; saturate rather than divide.
        return 100;
    }
    let scaled = (closed_turns as u64 * 100) / u64::from(target);
    scaled.min(100) as u8
}
