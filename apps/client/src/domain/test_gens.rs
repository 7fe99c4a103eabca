//! Proptest generators for turn logs.

use proptest::prelude::*;

use super::model::{Room, Turn};
use super::test_fixtures::{alternating_log, closed_turn, open_turn, playing_room};

/// A fully valid alternating log for a two-seat playing room.
pub(crate) fn valid_log() -> impl Strategy<Value = (Room, Vec<Turn>)> {
    (0u32..12, any::<bool>()).prop_map(|(total, want_open)| {
        let room = playing_room();
        let last_open = want_open && total > 0;
        let log = alternating_log(&room, total, last_open);
        (room, log)
    })
}

/// A valid log plus the same log in arbitrary arrival order.
pub(crate) fn valid_log_with_permutation() -> impl Strategy<Value = (Room, Vec<Turn>, Vec<Turn>)> {
    valid_log().prop_flat_map(|(room, log)| {
        let shuffled = Just(log.clone()).prop_shuffle();
        (Just(room), Just(log), shuffled)
    })
}

/// A log with junk the replica may actually see: duplicate numbers, holes,
/// arbitrary authors, arbitrary open/closed mix.
pub(crate) fn arbitrary_log() -> impl Strategy<Value = (Room, Vec<Turn>)> {
    proptest::collection::vec(
        (1u32..6, any::<bool>(), any::<bool>(), 0i64..100),
        0..10,
    )
    .prop_map(|entries| {
        let room = playing_room();
        let log = entries
            .into_iter()
            .map(|(number, second_seat, closed, secs)| {
                let player = if second_seat { "Bob" } else { "Alice" };
                if closed {
                    closed_turn(&room, number, player, "x", secs)
                } else {
                    open_turn(&room, number, player)
                }
            })
            .collect();
        (room, log)
    })
}
