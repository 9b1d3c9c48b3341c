//! Property-based tests for support algebra and dominance elimination.

use proptest::prelude::*;

use rust_nfg::core::Game;
use rust_nfg::support::{
    dominates, undominated_strategies_solve, undominated_strategies_solve_with, DominanceConfig,
    DominanceCriterion, ErrorKind, StrategySupportProfile, UndominatedSteps,
};

/// Strategy: a game shape with 2-3 players and 1-4 strategies each.
fn shape_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(1..=4usize, 2..=3)
}

/// Strategy: a seeded random game plus two keep-masks over its strategies.
fn game_and_masks() -> impl Strategy<Value = (Vec<usize>, u64, Vec<bool>, Vec<bool>)> {
    shape_strategy().prop_flat_map(|shape| {
        let total: usize = shape.iter().sum();
        (
            Just(shape),
            any::<u64>(),
            prop::collection::vec(any::<bool>(), total),
            prop::collection::vec(any::<bool>(), total),
        )
    })
}

fn random_game(shape: &[usize], seed: u64) -> Game {
    Game::builder(shape)
        .random_payoffs(seed, -3..=3)
        .build()
        .unwrap()
}

/// Drop every strategy whose mask bit is false, unless it is its player's last.
fn masked_profile(game: &Game, mask: &[bool]) -> StrategySupportProfile {
    let full = game.support_profile();
    full.iter()
        .zip(mask)
        .filter(|(_, keep)| !**keep)
        .fold(full.clone(), |profile, (strategy, _)| {
            profile.remove(strategy).unwrap_or(profile)
        })
}

proptest! {
    // 1. Every player keeps at least one strategy after masking
    #[test]
    fn masked_profiles_are_valid((shape, seed, mask, _) in game_and_masks()) {
        let game = random_game(&shape, seed);
        let profile = masked_profile(&game, &mask);
        prop_assert!(profile.num_strategies_per_player().iter().all(|&n| n >= 1));
        prop_assert!(profile <= game.support_profile());
    }

    // 2. Positional access agrees with iteration
    #[test]
    fn indexing_matches_iteration((shape, seed, mask, _) in game_and_masks()) {
        let game = random_game(&shape, seed);
        let profile = masked_profile(&game, &mask);
        for (i, strategy) in profile.iter().enumerate() {
            prop_assert_eq!(profile.get(i).unwrap(), strategy);
        }
        prop_assert_eq!(profile.get(profile.len()).unwrap_err().kind(), ErrorKind::Index);
    }

    // 3. Removal shrinks by exactly one or fails with UndefinedOperation
    #[test]
    fn remove_shrinks_or_fails(
        (shape, seed, mask, _) in game_and_masks(),
        pick in any::<prop::sample::Index>(),
    ) {
        let game = random_game(&shape, seed);
        let profile = masked_profile(&game, &mask);
        let strategy = profile.get(pick.index(profile.len())).unwrap();
        match profile.remove(strategy) {
            Ok(smaller) => {
                prop_assert_eq!(smaller.len() + 1, profile.len());
                prop_assert!(!smaller.contains(strategy));
                prop_assert!(smaller < profile);
            }
            Err(err) => {
                prop_assert_eq!(err.kind(), ErrorKind::UndefinedOperation);
                prop_assert_eq!(profile.num_strategies(strategy.player()), 1);
            }
        }
    }

    // 4. Intersection and union bound both operands
    #[test]
    fn lattice_bounds((shape, seed, left, right) in game_and_masks()) {
        let game = random_game(&shape, seed);
        let a = masked_profile(&game, &left);
        let b = masked_profile(&game, &right);

        let union = (&a | &b).unwrap();
        prop_assert!(a <= union && b <= union);
        prop_assert_eq!(&union, &(&b | &a).unwrap());

        match &a & &b {
            Ok(meet) => {
                prop_assert!(meet <= a && meet <= b);
                prop_assert_eq!(meet, (&b & &a).unwrap());
            }
            Err(err) => prop_assert_eq!(err.kind(), ErrorKind::Value),
        }
    }

    // 5. Difference excludes the subtrahend and stays inside the minuend
    #[test]
    fn difference_is_disjoint((shape, seed, left, right) in game_and_masks()) {
        let game = random_game(&shape, seed);
        let a = masked_profile(&game, &left);
        let b = masked_profile(&game, &right);

        match &a - &b {
            Ok(diff) => {
                prop_assert!(diff <= a);
                prop_assert!(diff.iter().all(|s| !b.contains(s)));
            }
            Err(err) => prop_assert_eq!(err.kind(), ErrorKind::Value),
        }
    }

    // 6. One pass returns a non-empty subset of its input
    #[test]
    fn reduction_is_monotone((shape, seed, mask, _) in game_and_masks(), weak in any::<bool>()) {
        let game = random_game(&shape, seed);
        let profile = masked_profile(&game, &mask);
        let config = if weak { DominanceConfig::weak() } else { DominanceConfig::strict() };

        let reduced = undominated_strategies_solve_with(&profile, &config);
        prop_assert!(reduced <= profile);
        prop_assert!(reduced.num_strategies_per_player().iter().all(|&n| n >= 1));
    }

    // 7. The fixed point is stable and reached in fewer steps than strategies
    #[test]
    fn fixed_point_is_stable((shape, seed, _, _) in game_and_masks()) {
        let game = random_game(&shape, seed);
        let full = game.support_profile();

        let steps = UndominatedSteps::new(&full).count();
        prop_assert!(steps < full.len());

        let fixed = UndominatedSteps::new(&full).fixed_point();
        prop_assert_eq!(undominated_strategies_solve(&fixed), fixed);
    }

    // 8. With external dominators, no survivor loses to a strategy in the support
    #[test]
    fn external_survivors_are_undominated_in_support(
        (shape, seed, mask, _) in game_and_masks(),
        weak in any::<bool>(),
    ) {
        let game = random_game(&shape, seed);
        let profile = masked_profile(&game, &mask);
        let criterion = if weak { DominanceCriterion::Weak } else { DominanceCriterion::Strict };
        let config = DominanceConfig::default()
            .with_criterion(criterion)
            .with_external(true);

        let reduced = undominated_strategies_solve_with(&profile, &config);
        prop_assert!(reduced <= profile);
        for survivor in reduced.iter() {
            for rival in profile.strategies(survivor.player()) {
                prop_assert!(!dominates(&profile, rival, survivor, criterion));
            }
        }
    }
}
