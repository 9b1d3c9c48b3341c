//! One-step elimination of dominated strategies.
//!
//! `undominated_strategies_solve` performs exactly one pass: every player's
//! dominated strategies are removed simultaneously, each judged against the
//! *input* profile. Iterated elimination is the caller's loop:
//!
//! ```
//! use rust_nfg::core::Game;
//! use rust_nfg::support::undominated_strategies_solve;
//!
//! // Prisoner's dilemma: defecting strictly dominates cooperating.
//! let game = Game::from_arrays(
//!     &[2, 2],
//!     vec![vec![-1.0, -3.0, 0.0, -2.0], vec![-1.0, 0.0, -3.0, -2.0]],
//! )
//! .unwrap();
//!
//! let mut profile = game.support_profile();
//! loop {
//!     let next = undominated_strategies_solve(&profile);
//!     if next == profile {
//!         break;
//!     }
//!     profile = next;
//! }
//! assert_eq!(profile.len(), 2);
//! ```
//!
//! `UndominatedSteps` wraps the same loop as an iterator yielding each
//! intermediate profile, so callers can observe or bound the steps.

use im::OrdSet;
use std::iter::FusedIterator;

use super::config::DominanceConfig;
use super::dominance::{is_dominated, DominanceOracle};
use super::profile::StrategySupportProfile;
use crate::core::{PlayerId, Strategy};

/// Remove strictly dominated strategies (one pass, dominators in support).
#[must_use]
pub fn undominated_strategies_solve(profile: &StrategySupportProfile) -> StrategySupportProfile {
    undominated_strategies_solve_with(profile, &DominanceConfig::default())
}

/// Remove the strategies `oracle` reports as dominated (one pass).
pub fn undominated_strategies_solve_with<O: DominanceOracle + ?Sized>(
    profile: &StrategySupportProfile,
    oracle: &O,
) -> StrategySupportProfile {
    let support = profile
        .game()
        .players()
        .map(|player| surviving(profile, player, oracle))
        .collect();
    let reduced = StrategySupportProfile::from_parts(profile.game().clone(), support);

    let removed = profile.len() - reduced.len();
    if removed > 0 {
        log::debug!(
            "eliminated {} dominated strategies ({} -> {})",
            removed,
            profile.len(),
            reduced.len()
        );
    }
    reduced
}

/// Remove the dominated strategies of a single player (one pass).
///
/// Other players' supports are copied unchanged. An unknown player leaves
/// the profile unchanged.
pub fn undominated_for_player<O: DominanceOracle + ?Sized>(
    profile: &StrategySupportProfile,
    player: PlayerId,
    oracle: &O,
) -> StrategySupportProfile {
    if !profile.game().has_player(player) {
        return profile.clone();
    }
    let support = profile
        .game()
        .players()
        .map(|pl| {
            if pl == player {
                surviving(profile, pl, oracle)
            } else {
                profile.player_support(pl).clone()
            }
        })
        .collect();
    StrategySupportProfile::from_parts(profile.game().clone(), support)
}

/// Restricts an oracle's dominators to the support.
struct InSupport<'a, O: ?Sized>(&'a O);

impl<O: DominanceOracle + ?Sized> DominanceOracle for InSupport<'_, O> {
    fn dominates(
        &self,
        profile: &StrategySupportProfile,
        dominator: Strategy,
        candidate: Strategy,
    ) -> bool {
        self.0.dominates(profile, dominator, candidate)
    }
}

/// Strategy numbers of `player` that no eligible strategy dominates.
///
/// If external dominators beat every strategy of the support, the survivors
/// are those undominated within the support instead.
fn surviving<O: DominanceOracle + ?Sized>(
    profile: &StrategySupportProfile,
    player: PlayerId,
    oracle: &O,
) -> OrdSet<u16> {
    let kept = undominated_numbers(profile, player, oracle);
    if !kept.is_empty() {
        return kept;
    }
    if oracle.external() {
        log::debug!("external dominators cover {}; using in-support dominance", player);
        let kept = undominated_numbers(profile, player, &InSupport(oracle));
        if !kept.is_empty() {
            return kept;
        }
    }
    log::debug!("no undominated strategy left for {}; keeping its support", player);
    profile.player_support(player).clone()
}

fn undominated_numbers<O: DominanceOracle + ?Sized>(
    profile: &StrategySupportProfile,
    player: PlayerId,
    oracle: &O,
) -> OrdSet<u16> {
    profile
        .strategies(player)
        .filter(|&strategy| {
            let dominated = is_dominated(profile, strategy, oracle);
            if dominated {
                log::trace!("{} is dominated", strategy);
            }
            !dominated
        })
        .map(|strategy| strategy.raw_number())
        .collect()
}

/// Successive one-pass reductions of a profile.
///
/// Each `next` runs one pass on the previous result and yields it; the
/// iterator ends at the first pass that changes nothing. Every yielded
/// profile is strictly smaller than the one before, so it always ends.
///
/// ```
/// use rust_nfg::core::Game;
/// use rust_nfg::support::UndominatedSteps;
///
/// let game = Game::new_table(&[2, 2]).unwrap();
/// // All payoffs are zero: nothing is strictly dominated.
/// let mut steps = UndominatedSteps::new(&game.support_profile());
/// assert!(steps.next().is_none());
/// assert_eq!(steps.current().len(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct UndominatedSteps<O = DominanceConfig> {
    current: StrategySupportProfile,
    oracle: O,
    finished: bool,
}

impl UndominatedSteps<DominanceConfig> {
    /// Steps of strict dominance elimination.
    pub fn new(profile: &StrategySupportProfile) -> Self {
        Self::with_oracle(profile, DominanceConfig::default())
    }
}

impl<O: DominanceOracle> UndominatedSteps<O> {
    /// Steps of elimination under `oracle`.
    pub fn with_oracle(profile: &StrategySupportProfile, oracle: O) -> Self {
        Self {
            current: profile.clone(),
            oracle,
            finished: false,
        }
    }

    /// The most recent profile (the input before the first step).
    pub fn current(&self) -> &StrategySupportProfile {
        &self.current
    }

    /// Drive the remaining steps and return the fixed point.
    pub fn fixed_point(mut self) -> StrategySupportProfile {
        while self.next().is_some() {}
        self.current
    }
}

impl<O: DominanceOracle> Iterator for UndominatedSteps<O> {
    type Item = StrategySupportProfile;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let next = undominated_strategies_solve_with(&self.current, &self.oracle);
        if next == self.current {
            self.finished = true;
            return None;
        }
        self.current = next.clone();
        Some(next)
    }
}

impl<O: DominanceOracle> FusedIterator for UndominatedSteps<O> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Game, Strategy};
    use crate::support::Overwhelming;

    fn strategy(game: &Game, player: u8, number: usize) -> Strategy {
        game.strategy(PlayerId::new(player), number).unwrap()
    }

    /// Row 2 is strictly dominated by row 0; column 1 only becomes dominated
    /// once row 2 is gone; row 1 only once column 1 is gone.
    fn cascade_game() -> Game {
        Game::builder(&[3, 2])
            .payoffs(&[0, 0], &[3.0, 2.0])
            .payoffs(&[0, 1], &[1.0, 1.0])
            .payoffs(&[1, 0], &[2.0, 1.0])
            .payoffs(&[1, 1], &[4.0, 0.0])
            .payoffs(&[2, 0], &[0.0, 0.0])
            .payoffs(&[2, 1], &[0.0, 3.0])
            .build()
            .unwrap()
    }

    #[test]
    fn test_single_pass_only() {
        let game = cascade_game();
        let full = game.support_profile();

        let once = undominated_strategies_solve(&full);
        assert_eq!(once.len(), 4);
        assert!(!once.contains(strategy(&game, 0, 2)));
        assert!(once.contains(strategy(&game, 1, 1)));
    }

    #[test]
    fn test_steps_reach_fixed_point() {
        let game = cascade_game();
        let full = game.support_profile();

        let sizes: Vec<usize> = UndominatedSteps::new(&full).map(|p| p.len()).collect();
        assert_eq!(sizes, vec![4, 3, 2]);

        let fixed = UndominatedSteps::new(&full).fixed_point();
        assert_eq!(
            fixed.iter().collect::<Vec<_>>(),
            vec![full.get(0).unwrap(), full.get(3).unwrap()]
        );
        assert_eq!(undominated_strategies_solve(&fixed), fixed);
    }

    #[test]
    fn test_steps_are_fused() {
        let game = cascade_game();
        let mut steps = UndominatedSteps::new(&game.support_profile());
        while steps.next().is_some() {}
        assert!(steps.next().is_none());
        assert_eq!(steps.current().len(), 2);
    }

    #[test]
    fn test_single_player_pass() {
        let game = cascade_game();
        let full = game.support_profile();
        let config = DominanceConfig::strict();

        let column_only = undominated_for_player(&full, PlayerId::new(1), &config);
        assert_eq!(column_only, full);

        let row_only = undominated_for_player(&full, PlayerId::new(0), &config);
        assert_eq!(row_only.num_strategies_per_player(), vec![2, 2]);

        let unknown = undominated_for_player(&full, PlayerId::new(7), &config);
        assert_eq!(unknown, full);
    }

    #[test]
    fn test_external_dominator_never_empties_support() {
        let game = cascade_game();
        let only_bottom = StrategySupportProfile::from_strategies(
            &game,
            [strategy(&game, 0, 2), strategy(&game, 1, 0), strategy(&game, 1, 1)],
        )
        .unwrap();
        let external = DominanceConfig::strict().with_external(true);

        let reduced = undominated_strategies_solve_with(&only_bottom, &external);
        assert!(reduced.contains(strategy(&game, 0, 2)));
        assert_eq!(reduced.num_strategies(PlayerId::new(0)), 1);
    }

    #[test]
    fn test_covered_support_still_drops_internally_dominated() {
        // Row payoffs by row: [0, 0], [1, 1], [2, 2].
        let game = Game::from_arrays(
            &[3, 2],
            vec![vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0], vec![0.0; 6]],
        )
        .unwrap();
        let without_best = game.support_profile().remove(strategy(&game, 0, 2)).unwrap();
        let external = DominanceConfig::strict().with_external(true);

        let reduced = undominated_strategies_solve_with(&without_best, &external);
        assert!(!reduced.contains(strategy(&game, 0, 0)));
        assert!(reduced.contains(strategy(&game, 0, 1)));
        assert_eq!(reduced, undominated_strategies_solve(&without_best));

        let fixed = UndominatedSteps::with_oracle(&without_best, external).fixed_point();
        assert_eq!(fixed.num_strategies(PlayerId::new(0)), 1);
    }

    #[test]
    fn test_custom_oracle() {
        let game = cascade_game();
        let full = game.support_profile();
        let oracle = Overwhelming::default();

        // Row 2 (worst 0) is overwhelmed by row 0 (worst 1 > best 0).
        let reduced = undominated_strategies_solve_with(&full, &oracle);
        assert!(!reduced.contains(strategy(&game, 0, 2)));
    }
}
