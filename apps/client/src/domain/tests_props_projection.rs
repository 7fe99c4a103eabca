//! Property-based tests for the projector.
//!
//! The projector sits between an untrusted replica and the renderer, so
//! the properties here are about totality and order independence, not just
//! happy paths.

use proptest::prelude::*;

use crate::domain::projection::project;
use crate::domain::view::Phase;
use crate::domain::{test_gens, test_prelude};

const TARGET: u32 = 10;

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: the projection depends only on the sorted log, never on
    /// the order records arrived in.
    #[test]
    fn prop_projection_is_permutation_invariant(
        (room, log, shuffled) in test_gens::valid_log_with_permutation(),
    ) {
        for player in ["Alice", "Bob"] {
            let from_sorted = project(&room, &log, player, TARGET);
            let from_shuffled = project(&room, &shuffled, player, TARGET);
            prop_assert_eq!(&from_sorted, &from_shuffled, "player {} saw different views", player);
        }
    }

    /// Property: projecting the same snapshot twice yields the same view.
    #[test]
    fn prop_projection_is_idempotent(
        (room, log) in test_gens::arbitrary_log(),
    ) {
        let first = project(&room, &log, "Alice", TARGET);
        let second = project(&room, &log, "Alice", TARGET);
        prop_assert_eq!(first, second);
    }

    /// Property: at most one player is ever in an acting phase, and on a
    /// valid log of a playing room exactly one is.
    #[test]
    fn prop_exactly_one_actor_on_valid_logs(
        (room, log) in test_gens::valid_log(),
    ) {
        let acting = ["Alice", "Bob"]
            .iter()
            .filter(|player| {
                matches!(
                    project(&room, &log, player, TARGET).phase,
                    Phase::AwaitingPromptChoice | Phase::AwaitingAnswer
                )
            })
            .count();
        prop_assert_eq!(acting, 1);
    }

    /// Property: the projector is total. Arbitrary junk in the replica
    /// never panics and never yields out-of-range progress.
    #[test]
    fn prop_projector_survives_arbitrary_logs(
        (room, log) in test_gens::arbitrary_log(),
    ) {
        for player in ["Alice", "Bob", "Mallory"] {
            let view = project(&room, &log, player, TARGET);
            prop_assert!(view.progress <= 100);
            prop_assert!(view.history.len() <= log.len());
            // History must stay strictly descending by turn number.
            for pair in view.history.windows(2) {
                prop_assert!(pair[0].turn_number > pair[1].turn_number);
            }
        }
    }

    /// Property: adjacent closed turns of a valid log alternate authors,
    /// and the projected next actor continues the alternation.
    #[test]
    fn prop_alternation_is_preserved(
        (room, log) in test_gens::valid_log(),
    ) {
        let view = project(&room, &log, "Alice", TARGET);
        for pair in view.history.windows(2) {
            prop_assert_ne!(&pair[0].player_name, &pair[1].player_name);
        }
        if let Some(last) = log.last() {
            if !last.is_open() {
                let actor = view.actor.clone().expect("playing room has an actor");
                prop_assert_ne!(actor, last.player_name.clone());
            }
        }
    }
}
