use crate::domain::projection::{normalize_turns, project};
use crate::domain::test_fixtures::{closed_turn, open_turn, playing_room};
use crate::domain::view::Phase;

#[test]
fn unordered_arrival_is_sorted_by_turn_number() {
    let room = playing_room();
    let turns = vec![
        closed_turn(&room, 3, "Alice", "third", 30),
        closed_turn(&room, 1, "Alice", "first", 10),
        closed_turn(&room, 2, "Bob", "second", 20),
    ];

    let normalized = normalize_turns(&turns);
    let numbers: Vec<u32> = normalized.iter().map(|t| t.turn_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[test]
fn duplicate_number_keeps_the_earlier_answered_record() {
    let room = playing_room();
    // The later-authored record arrives first in the fetch array.
    let late = closed_turn(&room, 3, "Bob", "late", 60);
    let early = closed_turn(&room, 3, "Bob", "early", 40);
    let turns = vec![late.clone(), early.clone()];

    let normalized = normalize_turns(&turns);
    assert_eq!(normalized.len(), 1);
    assert_eq!(normalized[0].id, early.id);
    assert_eq!(normalized[0].answer.as_deref(), Some("early"));
}

#[test]
fn duplicate_number_prefers_answered_over_open() {
    let room = playing_room();
    let open = open_turn(&room, 2, "Alice");
    let answered = closed_turn(&room, 2, "Alice", "kept", 15);
    let turns = vec![open.clone(), answered.clone()];

    let normalized = normalize_turns(&turns);
    assert_eq!(normalized.len(), 1);
    assert_eq!(normalized[0].id, answered.id);
}

#[test]
fn duplicate_open_records_keep_the_earlier_seen_one() {
    let room = playing_room();
    let first_seen = open_turn(&room, 2, "Alice");
    let second_seen = open_turn(&room, 2, "Bob");
    let turns = vec![first_seen.clone(), second_seen];

    let normalized = normalize_turns(&turns);
    assert_eq!(normalized.len(), 1);
    assert_eq!(normalized[0].id, first_seen.id);
}

#[test]
fn duplicates_do_not_disturb_the_projection() {
    let room = playing_room();
    let turns = vec![
        closed_turn(&room, 1, "Alice", "one", 10),
        closed_turn(&room, 2, "Bob", "two", 20),
        // A racing duplicate of turn 2 that lost.
        closed_turn(&room, 2, "Bob", "two again", 25),
    ];

    let view = project(&room, &turns, "Alice", 10);
    assert_eq!(view.phase, Phase::AwaitingPromptChoice);
    assert_eq!(view.history.len(), 2);
    assert_eq!(view.max_turn_number, 2);
    assert_eq!(view.progress, 20);
}
