//! Dominance between pure strategies.
//!
//! All comparisons are made against the contingencies of the *other*
//! players restricted to their supports in a given profile. The strategies
//! being compared need not themselves be in the support.
//!
//! The reducer consults a `DominanceOracle`. `DominanceConfig` is the
//! default oracle (pure-strategy payoff dominance, strict or weak);
//! `Overwhelming` is a coarser one. Other criteria plug in by implementing
//! the trait.

use super::config::{DominanceConfig, DominanceCriterion};
use super::profile::StrategySupportProfile;
use crate::core::{Contingencies, PlayerId, Strategy};

/// Decides whether one strategy dominates another.
///
/// ## Contract
///
/// - `dominator` and `candidate` belong to the same player of the
///   profile's game; return `false` otherwise.
/// - The relation must be irreflexive.
/// - The answer may depend only on the game's payoffs and on the supports
///   of the *other* players in `profile`.
///
/// If external dominators leave a player no survivor, the reducer falls back
/// to dominators inside the support; if that also leaves none, the player's
/// support is kept whole, so a cyclic relation cannot empty a support.
pub trait DominanceOracle {
    /// True if `dominator` dominates `candidate` given `profile`.
    fn dominates(
        &self,
        profile: &StrategySupportProfile,
        dominator: Strategy,
        candidate: Strategy,
    ) -> bool;

    /// Whether dominators may come from outside the support.
    fn external(&self) -> bool {
        false
    }
}

impl<O: DominanceOracle + ?Sized> DominanceOracle for &O {
    fn dominates(
        &self,
        profile: &StrategySupportProfile,
        dominator: Strategy,
        candidate: Strategy,
    ) -> bool {
        (**self).dominates(profile, dominator, candidate)
    }

    fn external(&self) -> bool {
        (**self).external()
    }
}

impl DominanceOracle for DominanceConfig {
    fn dominates(
        &self,
        profile: &StrategySupportProfile,
        dominator: Strategy,
        candidate: Strategy,
    ) -> bool {
        dominates(profile, dominator, candidate, self.criterion)
    }

    fn external(&self) -> bool {
        self.external
    }
}

/// Oracle treating overwhelming as dominance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Overwhelming {
    pub criterion: DominanceCriterion,
    pub external: bool,
}

impl DominanceOracle for Overwhelming {
    fn dominates(
        &self,
        profile: &StrategySupportProfile,
        dominator: Strategy,
        candidate: Strategy,
    ) -> bool {
        overwhelms(profile, dominator, candidate, self.criterion)
    }

    fn external(&self) -> bool {
        self.external
    }
}

/// Contingencies of everyone but `player`, restricted to `profile`.
///
/// `player`'s own entry is a placeholder (0) for the caller to overwrite.
pub fn opponent_contingencies(profile: &StrategySupportProfile, player: PlayerId) -> Contingencies {
    let choices = profile
        .game()
        .players()
        .map(|pl| {
            if pl == player {
                vec![0]
            } else {
                profile.player_support(pl).iter().map(|&n| usize::from(n)).collect()
            }
        })
        .collect();
    Contingencies::new(choices)
}

fn comparable(profile: &StrategySupportProfile, s: Strategy, t: Strategy) -> bool {
    s != t
        && s.player() == t.player()
        && profile.game().owns(s)
        && profile.game().owns(t)
}

/// True if `dominator` dominates `candidate` under `criterion`, with the
/// other players restricted to their supports in `profile`.
///
/// ```
/// use rust_nfg::core::{Game, PlayerId};
/// use rust_nfg::support::{dominates, DominanceCriterion};
///
/// // Row player: "Down" pays 1 more than "Up" everywhere.
/// let game = Game::from_arrays(&[2, 2], vec![vec![0.0, 1.0, 1.0, 2.0], vec![0.0; 4]]).unwrap();
/// let up = game.strategy(PlayerId::new(0), 0).unwrap();
/// let down = game.strategy(PlayerId::new(0), 1).unwrap();
///
/// let full = game.support_profile();
/// assert!(dominates(&full, down, up, DominanceCriterion::Strict));
/// assert!(!dominates(&full, up, down, DominanceCriterion::Weak));
/// ```
#[must_use]
pub fn dominates(
    profile: &StrategySupportProfile,
    dominator: Strategy,
    candidate: Strategy,
    criterion: DominanceCriterion,
) -> bool {
    if !comparable(profile, dominator, candidate) {
        return false;
    }
    let game = profile.game();
    let player = candidate.player();
    let mut strictly_better = false;

    for mut contingency in opponent_contingencies(profile, player) {
        contingency[player.index()] = dominator.number();
        let with_dominator = game.payoff(&contingency, player);
        contingency[player.index()] = candidate.number();
        let with_candidate = game.payoff(&contingency, player);

        if with_dominator < with_candidate {
            return false;
        }
        if with_dominator > with_candidate {
            strictly_better = true;
        } else if criterion == DominanceCriterion::Strict {
            return false;
        }
    }
    strictly_better
}

/// True if the worst payoff of `dominator` beats the best payoff of
/// `candidate` over the opponents' supports (`>=` under the weak criterion).
#[must_use]
pub fn overwhelms(
    profile: &StrategySupportProfile,
    dominator: Strategy,
    candidate: Strategy,
    criterion: DominanceCriterion,
) -> bool {
    if !comparable(profile, dominator, candidate) {
        return false;
    }
    let game = profile.game();
    let player = candidate.player();
    let mut worst = f64::INFINITY;
    let mut best = f64::NEG_INFINITY;

    for mut contingency in opponent_contingencies(profile, player) {
        contingency[player.index()] = dominator.number();
        worst = worst.min(game.payoff(&contingency, player));
        contingency[player.index()] = candidate.number();
        best = best.max(game.payoff(&contingency, player));
    }

    match criterion {
        DominanceCriterion::Strict => worst > best,
        DominanceCriterion::Weak => worst >= best,
    }
}

/// True if some eligible strategy of the same player dominates `strategy`.
///
/// Eligible dominators are the player's strategies in the support, or all
/// of the player's strategies if the oracle is external.
pub fn is_dominated<O: DominanceOracle + ?Sized>(
    profile: &StrategySupportProfile,
    strategy: Strategy,
    oracle: &O,
) -> bool {
    let player = strategy.player();
    let beats = |s: Strategy| s != strategy && oracle.dominates(profile, s, strategy);
    if oracle.external() {
        profile.game().strategies(player).any(beats)
    } else {
        profile.strategies(player).any(beats)
    }
}
