//! Strategy support profiles.
//!
//! A `StrategySupportProfile` selects a non-empty subset of every player's
//! strategies in one game. Profiles are immutable values: `remove`,
//! `difference`, `intersection` and `union` build new profiles and leave
//! their operands untouched.
//!
//! ## Representation
//!
//! Each player's support is a persistent ordered set of strategy numbers
//! (`im::OrdSet`), so iteration follows game order regardless of how the
//! profile was derived, and deriving a profile shares structure with its
//! source.
//!
//! ## Usage
//!
//! ```
//! use rust_nfg::core::{Game, PlayerId};
//!
//! let game = Game::new_table(&[3, 2]).unwrap();
//! let full = game.support_profile();
//! let s = game.strategy(PlayerId::new(0), 2).unwrap();
//!
//! let smaller = full.remove(s).unwrap();
//! assert_eq!(full.len(), 5);
//! assert_eq!(smaller.len(), 4);
//! assert!(!smaller.contains(s));
//! assert!(smaller <= full);
//! ```

use im::OrdSet;
use std::cmp::Ordering;
use std::ops::{BitAnd, BitOr, Sub};

use super::error::{RemoveFailure, SupportError};
use crate::core::{Game, PlayerId, PlayerMap, Strategy};

/// A non-empty selection of strategies for every player of a game.
#[derive(Clone, Debug)]
pub struct StrategySupportProfile {
    game: Game,
    support: PlayerMap<OrdSet<u16>>,
}

impl StrategySupportProfile {
    /// The full support: every strategy of every player.
    #[must_use]
    pub fn new(game: &Game) -> Self {
        let support = PlayerMap::new(game.num_players(), |player| {
            (0..game.num_strategies(player) as u16).collect()
        });
        Self {
            game: game.clone(),
            support,
        }
    }

    /// A support containing exactly the given strategies.
    ///
    /// Fails if a strategy belongs to another game or if some player is
    /// left without strategies.
    pub fn from_strategies(
        game: &Game,
        strategies: impl IntoIterator<Item = Strategy>,
    ) -> Result<Self, SupportError> {
        let mut support = PlayerMap::with_value(game.num_players(), OrdSet::new());
        for strategy in strategies {
            if !game.owns(strategy) {
                return Err(SupportError::ForeignStrategy(strategy));
            }
            support[strategy.player()].insert(strategy.raw_number());
        }
        if let Some((player, _)) = support.iter().find(|(_, set)| set.is_empty()) {
            return Err(SupportError::EmptySupport { player });
        }
        Ok(Self::from_parts(game.clone(), support))
    }

    pub(crate) fn from_parts(game: Game, support: PlayerMap<OrdSet<u16>>) -> Self {
        debug_assert!(support.values().all(|set| !set.is_empty()));
        Self { game, support }
    }

    pub(crate) fn player_support(&self, player: PlayerId) -> &OrdSet<u16> {
        &self.support[player]
    }

    /// The game this profile is defined on.
    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Total number of strategies in the support, over all players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.support.values().map(OrdSet::len).sum()
    }

    /// Always false: every player keeps at least one strategy.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of strategies of `player` in the support.
    #[must_use]
    pub fn num_strategies(&self, player: PlayerId) -> usize {
        self.support.try_get(player).map_or(0, OrdSet::len)
    }

    /// Strategy counts of every player, in player order.
    #[must_use]
    pub fn num_strategies_per_player(&self) -> Vec<usize> {
        self.support.values().map(OrdSet::len).collect()
    }

    /// A player's strategies in the support, in game order.
    pub fn strategies(&self, player: PlayerId) -> impl Iterator<Item = Strategy> + '_ {
        let id = self.game.id();
        self.support
            .try_get(player)
            .into_iter()
            .flat_map(OrdSet::iter)
            .map(move |&n| Strategy::new(id, player, n))
    }

    /// True if `strategy` is in the support.
    #[must_use]
    pub fn contains(&self, strategy: Strategy) -> bool {
        strategy.game() == self.game.id()
            && self
                .support
                .try_get(strategy.player())
                .is_some_and(|set| set.contains(&strategy.raw_number()))
    }

    /// The `index`-th strategy: players in game order, then strategies in
    /// game order.
    pub fn get(&self, index: usize) -> Result<Strategy, SupportError> {
        let mut remaining = index;
        for (player, set) in self.support.iter() {
            if let Some(&n) = set.iter().nth(remaining) {
                return Ok(Strategy::new(self.game.id(), player, n));
            }
            remaining -= set.len();
        }
        Err(SupportError::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Iterate over the support in game order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            profile: self,
            player: 0,
            current: None,
            remaining: self.len(),
        }
    }

    /// A copy of this profile without `strategy`.
    ///
    /// Fails if `strategy` is not in the support or is the only strategy of
    /// its player in the support.
    pub fn remove(&self, strategy: Strategy) -> Result<Self, SupportError> {
        if !self.contains(strategy) {
            return Err(SupportError::UndefinedOperation {
                strategy,
                reason: RemoveFailure::NotInSupport,
            });
        }
        let set = &self.support[strategy.player()];
        if set.len() == 1 {
            return Err(SupportError::UndefinedOperation {
                strategy,
                reason: RemoveFailure::LastStrategy,
            });
        }
        let mut support = self.support.clone();
        support[strategy.player()] = set.without(&strategy.raw_number());
        Ok(Self::from_parts(self.game.clone(), support))
    }

    /// A copy of this profile with `strategy` added.
    pub fn with_strategy(&self, strategy: Strategy) -> Result<Self, SupportError> {
        if !self.game.owns(strategy) {
            return Err(SupportError::ForeignStrategy(strategy));
        }
        let mut support = self.support.clone();
        support[strategy.player()] = support[strategy.player()].update(strategy.raw_number());
        Ok(Self::from_parts(self.game.clone(), support))
    }

    fn check_compatible(&self, other: &Self) -> Result<(), SupportError> {
        if self.game.same_game(&other.game) {
            Ok(())
        } else {
            Err(SupportError::IncompatibleProfiles)
        }
    }

    /// Combine the two profiles player by player.
    fn combine(
        &self,
        other: &Self,
        op: impl Fn(&OrdSet<u16>, &OrdSet<u16>) -> OrdSet<u16>,
    ) -> Result<Self, SupportError> {
        self.check_compatible(other)?;
        let mut sets = Vec::with_capacity(self.support.player_count());
        for ((player, mine), theirs) in self.support.iter().zip(other.support.values()) {
            let set = op(mine, theirs);
            if set.is_empty() {
                return Err(SupportError::EmptySupport { player });
            }
            sets.push(set);
        }
        Ok(Self::from_parts(self.game.clone(), sets.into_iter().collect()))
    }

    /// Strategies in `self` but not in `other`.
    pub fn difference(&self, other: &Self) -> Result<Self, SupportError> {
        self.combine(other, |mine, theirs| {
            mine.iter().filter(|&n| !theirs.contains(n)).copied().collect()
        })
    }

    /// Strategies in both `self` and `other`.
    pub fn intersection(&self, other: &Self) -> Result<Self, SupportError> {
        self.combine(other, |mine, theirs| {
            mine.iter().filter(|&n| theirs.contains(n)).copied().collect()
        })
    }

    /// Strategies in either `self` or `other`.
    pub fn union(&self, other: &Self) -> Result<Self, SupportError> {
        self.combine(other, |mine, theirs| mine.clone().union(theirs.clone()))
    }

    /// True if every strategy of `self` is in `other`.
    pub fn is_subset_of(&self, other: &Self) -> Result<bool, SupportError> {
        self.check_compatible(other)?;
        Ok(covers(&other.support, &self.support))
    }

    /// True if every strategy of `other` is in `self`.
    pub fn is_superset_of(&self, other: &Self) -> Result<bool, SupportError> {
        other.is_subset_of(self)
    }
}

/// True if `outer` contains every strategy of `inner`.
fn covers(outer: &PlayerMap<OrdSet<u16>>, inner: &PlayerMap<OrdSet<u16>>) -> bool {
    outer
        .values()
        .zip(inner.values())
        .all(|(o, i)| i.iter().all(|n| o.contains(n)))
}

impl PartialEq for StrategySupportProfile {
    fn eq(&self, other: &Self) -> bool {
        self.game.same_game(&other.game) && self.support == other.support
    }
}

impl Eq for StrategySupportProfile {}

/// Subset order. Profiles on different games, or neither containing the
/// other, are incomparable.
impl PartialOrd for StrategySupportProfile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.game.same_game(&other.game) {
            return None;
        }
        match (
            covers(&other.support, &self.support),
            covers(&self.support, &other.support),
        ) {
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            (false, false) => None,
        }
    }
}

impl Sub for &StrategySupportProfile {
    type Output = Result<StrategySupportProfile, SupportError>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.difference(rhs)
    }
}

impl BitAnd for &StrategySupportProfile {
    type Output = Result<StrategySupportProfile, SupportError>;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}

impl BitOr for &StrategySupportProfile {
    type Output = Result<StrategySupportProfile, SupportError>;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl<'a> IntoIterator for &'a StrategySupportProfile {
    type Item = Strategy;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Display for StrategySupportProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, player) in self.support.player_ids().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{{")?;
            for strategy in self.strategies(player) {
                let label = self.game.strategy_label(strategy).unwrap_or("?");
                write!(f, " \"{}\"", label)?;
            }
            write!(f, " }}")?;
        }
        Ok(())
    }
}

/// Iterator over the strategies of a support profile, in game order.
pub struct Iter<'a> {
    profile: &'a StrategySupportProfile,
    player: usize,
    current: Option<im::ordset::Iter<'a, u16>>,
    remaining: usize,
}

impl Iterator for Iter<'_> {
    type Item = Strategy;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(numbers) = self.current.as_mut() {
                if let Some(&n) = numbers.next() {
                    self.remaining -= 1;
                    let player = PlayerId::new(self.player as u8);
                    return Some(Strategy::new(self.profile.game.id(), player, n));
                }
                self.player += 1;
            }
            if self.player >= self.profile.support.player_count() {
                self.current = None;
                return None;
            }
            let set = &self.profile.support[PlayerId::new(self.player as u8)];
            self.current = Some(set.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::ErrorKind;

    fn strategy(game: &Game, player: u8, number: usize) -> Strategy {
        game.strategy(PlayerId::new(player), number).unwrap()
    }

    #[test]
    fn test_full_support() {
        let game = Game::new_table(&[3, 2]).unwrap();
        let profile = game.support_profile();

        assert_eq!(profile.len(), 5);
        assert!(!profile.is_empty());
        assert_eq!(profile.num_strategies_per_player(), vec![3, 2]);
        assert_eq!(profile.num_strategies(PlayerId::new(1)), 2);
        assert_eq!(profile.num_strategies(PlayerId::new(9)), 0);
        for s in game.players().flat_map(|p| game.strategies(p)) {
            assert!(profile.contains(s));
        }
    }

    #[test]
    fn test_iteration_order_is_game_order() {
        let game = Game::new_table(&[3, 2]).unwrap();
        let profile = game
            .support_profile()
            .remove(strategy(&game, 0, 0))
            .unwrap()
            .with_strategy(strategy(&game, 0, 0))
            .unwrap()
            .remove(strategy(&game, 1, 0))
            .unwrap();

        let order: Vec<(u8, usize)> = profile.iter().map(|s| (s.player().0, s.number())).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (0, 2), (1, 1)]);
        assert_eq!(profile.iter().len(), 4);

        // Restartable.
        assert_eq!(profile.iter().count(), (&profile).into_iter().count());
    }

    #[test]
    fn test_get() {
        let game = Game::new_table(&[2, 3]).unwrap();
        let profile = game.support_profile();

        assert_eq!(profile.get(0).unwrap(), strategy(&game, 0, 0));
        assert_eq!(profile.get(2).unwrap(), strategy(&game, 1, 0));
        assert_eq!(profile.get(4).unwrap(), strategy(&game, 1, 2));

        let err = profile.get(5).unwrap_err();
        assert_eq!(err, SupportError::IndexOutOfRange { index: 5, len: 5 });
        assert_eq!(err.kind(), ErrorKind::Index);
    }

    #[test]
    fn test_get_matches_iter() {
        let game = Game::new_table(&[4, 3, 2]).unwrap();
        let profile = game
            .support_profile()
            .remove(strategy(&game, 0, 1))
            .unwrap()
            .remove(strategy(&game, 1, 2))
            .unwrap();

        for (i, s) in profile.iter().enumerate() {
            assert_eq!(profile.get(i).unwrap(), s);
        }
    }

    #[test]
    fn test_remove_does_not_touch_operand() {
        let game = Game::new_table(&[2, 2]).unwrap();
        let full = game.support_profile();
        let s = strategy(&game, 1, 0);

        let smaller = full.remove(s).unwrap();
        assert!(full.contains(s));
        assert!(!smaller.contains(s));
        assert_eq!(full.len(), 4);
    }

    #[test]
    fn test_remove_errors() {
        let game = Game::new_table(&[2, 2]).unwrap();
        let s = strategy(&game, 0, 0);
        let profile = game.support_profile().remove(s).unwrap();

        assert_eq!(
            profile.remove(s).unwrap_err(),
            SupportError::UndefinedOperation {
                strategy: s,
                reason: RemoveFailure::NotInSupport
            }
        );
        assert_eq!(
            profile.remove(strategy(&game, 0, 1)).unwrap_err(),
            SupportError::UndefinedOperation {
                strategy: strategy(&game, 0, 1),
                reason: RemoveFailure::LastStrategy
            }
        );
    }

    #[test]
    fn test_foreign_strategies() {
        let game = Game::new_table(&[2, 2]).unwrap();
        let other = Game::new_table(&[2, 2]).unwrap();
        let foreign = strategy(&other, 0, 0);
        let profile = game.support_profile();

        assert!(!profile.contains(foreign));
        assert_eq!(profile.remove(foreign).unwrap_err().kind(), ErrorKind::UndefinedOperation);
        assert_eq!(
            profile.with_strategy(foreign).unwrap_err(),
            SupportError::ForeignStrategy(foreign)
        );
    }

    #[test]
    fn test_from_strategies() {
        let game = Game::new_table(&[3, 2]).unwrap();
        let profile = StrategySupportProfile::from_strategies(
            &game,
            [strategy(&game, 1, 1), strategy(&game, 0, 2), strategy(&game, 0, 0)],
        )
        .unwrap();
        assert_eq!(profile.len(), 3);
        assert_eq!(profile.get(0).unwrap(), strategy(&game, 0, 0));

        let err =
            StrategySupportProfile::from_strategies(&game, [strategy(&game, 0, 0)]).unwrap_err();
        assert_eq!(err, SupportError::EmptySupport { player: PlayerId::new(1) });
    }

    #[test]
    fn test_incompatible_games() {
        let a = Game::new_table(&[2, 2]).unwrap().support_profile();
        let b = Game::new_table(&[2, 2]).unwrap().support_profile();

        assert_ne!(a, b);
        assert_eq!(a.partial_cmp(&b), None);
        assert_eq!((&a - &b).unwrap_err(), SupportError::IncompatibleProfiles);
        assert_eq!((&a & &b).unwrap_err(), SupportError::IncompatibleProfiles);
        assert_eq!((&a | &b).unwrap_err(), SupportError::IncompatibleProfiles);
        assert_eq!(a.is_subset_of(&b).unwrap_err().kind(), ErrorKind::Value);
    }

    #[test]
    fn test_subset_order() {
        let game = Game::new_table(&[2, 2]).unwrap();
        let full = game.support_profile();
        let left = full.remove(strategy(&game, 0, 0)).unwrap();
        let right = full.remove(strategy(&game, 0, 1)).unwrap();

        assert!(left <= full);
        assert!(left < full);
        assert!(full >= right);
        assert!(!(left <= right) && !(right <= left));
        assert!(left.is_subset_of(&full).unwrap());
        assert!(full.is_superset_of(&left).unwrap());
        assert!(!full.is_subset_of(&left).unwrap());
    }

    #[test]
    fn test_equality_ignores_derivation() {
        let game = Game::new_table(&[3, 2]).unwrap();
        let a = game
            .support_profile()
            .remove(strategy(&game, 0, 0))
            .unwrap()
            .remove(strategy(&game, 0, 1))
            .unwrap();
        let b = game
            .support_profile()
            .remove(strategy(&game, 0, 1))
            .unwrap()
            .remove(strategy(&game, 0, 0))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_display() {
        let game = Game::builder(&[2, 2])
            .strategy_labels(PlayerId::new(0), ["U", "D"])
            .strategy_labels(PlayerId::new(1), ["L", "R"])
            .build()
            .unwrap();
        let profile = game.support_profile().remove(strategy(&game, 1, 0)).unwrap();

        assert_eq!(profile.to_string(), r#"{ "U" "D" } { "R" }"#);
    }
}
