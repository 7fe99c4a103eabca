use crate::domain::projection::project;
use crate::domain::test_fixtures::{
    alternating_log, closed_turn, open_turn, playing_room, waiting_room,
};
use crate::domain::view::Phase;

const TARGET: u32 = 10;

#[test]
fn empty_log_gives_first_seat_the_opening_move() {
    let room = playing_room();

    let for_alice = project(&room, &[], "Alice", TARGET);
    assert_eq!(for_alice.phase, Phase::AwaitingPromptChoice);
    assert_eq!(for_alice.actor.as_deref(), Some("Alice"));
    assert_eq!(for_alice.max_turn_number, 0);
    assert_eq!(for_alice.next_turn_number(), 1);
    assert!(for_alice.history.is_empty());

    let for_bob = project(&room, &[], "Bob", TARGET);
    assert_eq!(for_bob.phase, Phase::Waiting);
    assert_eq!(for_bob.actor.as_deref(), Some("Alice"));
}

#[test]
fn open_turn_waits_on_its_author() {
    let room = playing_room();
    let turns = vec![open_turn(&room, 1, "Alice")];

    let for_bob = project(&room, &turns, "Bob", TARGET);
    assert_eq!(for_bob.phase, Phase::WaitingOnOther);
    assert_eq!(for_bob.actor.as_deref(), Some("Alice"));
    assert_eq!(for_bob.open_turn.as_ref().map(|t| t.turn_number), Some(1));

    let for_alice = project(&room, &turns, "Alice", TARGET);
    assert_eq!(for_alice.phase, Phase::AwaitingAnswer);
}

#[test]
fn closed_turn_hands_the_move_to_the_partner() {
    let room = playing_room();
    let turns = vec![closed_turn(&room, 1, "Alice", "blue", 5)];

    let for_bob = project(&room, &turns, "Bob", TARGET);
    assert_eq!(for_bob.phase, Phase::AwaitingPromptChoice);
    assert_eq!(for_bob.actor.as_deref(), Some("Bob"));
    assert!(for_bob.open_turn.is_none());
    assert_eq!(for_bob.history.len(), 1);

    let for_alice = project(&room, &turns, "Alice", TARGET);
    assert_eq!(for_alice.phase, Phase::Waiting);
}

#[test]
fn history_is_closed_turns_newest_first() {
    let room = playing_room();
    let turns = alternating_log(&room, 4, true);

    let view = project(&room, &turns, "Alice", TARGET);
    let numbers: Vec<u32> = view.history.iter().map(|t| t.turn_number).collect();
    assert_eq!(numbers, vec![3, 2, 1]);
    assert_eq!(view.open_turn.as_ref().map(|t| t.turn_number), Some(4));
    assert_eq!(view.max_turn_number, 4);
}

#[test]
fn alternation_holds_across_a_long_log() {
    let room = playing_room();
    let turns = alternating_log(&room, 6, false);

    // Turn 6 was Bob's, so Alice draws next.
    let view = project(&room, &turns, "Alice", TARGET);
    assert_eq!(view.phase, Phase::AwaitingPromptChoice);
    assert_eq!(view.actor.as_deref(), Some("Alice"));

    for pair in view.history.windows(2) {
        assert_ne!(
            pair[0].player_name, pair[1].player_name,
            "adjacent closed turns must have different authors"
        );
    }
}

#[test]
fn room_not_started_projects_to_waiting() {
    let room = waiting_room();
    let view = project(&room, &[], "Alice", TARGET);
    assert_eq!(view.phase, Phase::Waiting);
    assert_eq!(view.actor, None);
}

#[test]
fn viewer_without_a_seat_projects_to_waiting() {
    let room = playing_room();
    let turns = vec![open_turn(&room, 1, "Alice")];
    let view = project(&room, &turns, "Mallory", TARGET);
    assert_eq!(view.phase, Phase::Waiting);
    // The log is still visible to a spectator.
    assert_eq!(view.max_turn_number, 1);
}

#[test]
fn projection_is_idempotent_on_a_snapshot() {
    let room = playing_room();
    let turns = alternating_log(&room, 5, true);
    let first = project(&room, &turns, "Bob", TARGET);
    let second = project(&room, &turns, "Bob", TARGET);
    assert_eq!(first, second);
}

#[test]
fn progress_rides_on_closed_turns_only() {
    let room = playing_room();
    let mut turns = alternating_log(&room, 5, false);
    let view = project(&room, &turns, "Alice", TARGET);
    assert_eq!(view.progress, 50);

    // Opening a sixth turn changes nothing until it is answered.
    turns.push(open_turn(&room, 6, "Bob"));
    let view = project(&room, &turns, "Alice", TARGET);
    assert_eq!(view.progress, 50);
}
