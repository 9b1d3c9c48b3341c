//! Strategic-form table games.
//!
//! A `Game` is an immutable, cheaply cloneable handle to a frozen game
//! definition: ordered players, each with ordered labelled strategies, and
//! one payoff per player for every pure-strategy contingency.
//!
//! ## Payoff layout
//!
//! Payoffs are stored per player in a flat row-major table over the
//! players' strategy numbers: the last player's strategy varies fastest.
//! This is also the layout expected by `GameBuilder::payoff_table`,
//! `Game::from_arrays` and `GameConfig::payoffs`.
//!
//! ## Usage
//!
//! ```
//! use rust_nfg::core::{Game, PlayerId};
//!
//! let game = Game::builder(&[2, 2])
//!     .title("Prisoner's dilemma")
//!     .strategy_labels(PlayerId::new(0), ["C", "D"])
//!     .strategy_labels(PlayerId::new(1), ["C", "D"])
//!     .payoffs(&[0, 0], &[-1.0, -1.0])
//!     .payoffs(&[0, 1], &[-3.0, 0.0])
//!     .payoffs(&[1, 0], &[0.0, -3.0])
//!     .payoffs(&[1, 1], &[-2.0, -2.0])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(game.num_players(), 2);
//! assert_eq!(game.payoff(&[0, 1], PlayerId::new(0)), -3.0);
//! ```

use rustc_hash::FxHashMap;
use std::ops::RangeInclusive;
use std::sync::Arc;
use thiserror::Error;

use super::config::GameConfig;
use super::player::{PlayerId, PlayerMap};
use super::rng::PayoffRng;
use super::strategy::{GameId, Strategy};
use crate::support::StrategySupportProfile;

/// Errors raised while constructing a game.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GameError {
    #[error("a game needs at least one player")]
    NoPlayers,
    #[error("at most 255 players are supported (got {0})")]
    TooManyPlayers(usize),
    #[error("{0} has no strategies")]
    NoStrategies(PlayerId),
    #[error("{player} has {count} strategies; at most 65535 are supported")]
    TooManyStrategies { player: PlayerId, count: usize },
    #[error("payoff table with shape {0:?} is too large")]
    TableTooLarge(Vec<usize>),
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
    #[error("{player} has {expected} strategies but {actual} labels were given")]
    LabelCount {
        player: PlayerId,
        expected: usize,
        actual: usize,
    },
    #[error("contingency {0:?} is outside the payoff table")]
    ContingencyOutOfRange(Vec<usize>),
    #[error("expected one payoff per player ({expected}), got {actual}")]
    PayoffVector { expected: usize, actual: usize },
    #[error("expected {expected} payoff tables, got {actual}")]
    TableCount { expected: usize, actual: usize },
    #[error("payoff table for {player} has {actual} entries; expected {expected}")]
    PayoffCount {
        player: PlayerId,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug)]
struct PlayerRep {
    label: String,
    strategies: Vec<String>,
    by_label: FxHashMap<String, u16>,
}

impl PlayerRep {
    fn new(label: String, strategies: Vec<String>) -> Self {
        let mut by_label = FxHashMap::default();
        for (number, name) in strategies.iter().enumerate() {
            by_label.entry(name.clone()).or_insert(number as u16);
        }
        Self {
            label,
            strategies,
            by_label,
        }
    }
}

#[derive(Debug)]
struct GameRep {
    id: GameId,
    title: String,
    shape: Vec<usize>,
    players: PlayerMap<PlayerRep>,
    payoffs: PlayerMap<Vec<f64>>,
}

/// Handle to an immutable strategic-form game.
///
/// Cloning is O(1) and clones compare equal; separately constructed games
/// never do.
#[derive(Clone, Debug)]
pub struct Game {
    rep: Arc<GameRep>,
}

impl Game {
    /// Create a table game with the given strategy counts and all-zero payoffs.
    pub fn new_table(shape: &[usize]) -> Result<Self, GameError> {
        GameBuilder::new(shape).build()
    }

    /// Start building a table game with the given strategy counts.
    pub fn builder(shape: &[usize]) -> GameBuilder {
        GameBuilder::new(shape)
    }

    /// Create a game from one row-major payoff table per player.
    ///
    /// `shape` gives each player's strategy count; every table must have
    /// `shape.iter().product()` entries.
    pub fn from_arrays(shape: &[usize], tables: Vec<Vec<f64>>) -> Result<Self, GameError> {
        if tables.len() != shape.len() {
            return Err(GameError::TableCount {
                expected: shape.len(),
                actual: tables.len(),
            });
        }
        tables
            .into_iter()
            .enumerate()
            .fold(GameBuilder::new(shape), |builder, (pl, table)| {
                builder.payoff_table(PlayerId::new(pl as u8), table)
            })
            .build()
    }

    /// Create a game from a configuration.
    pub fn from_config(config: &GameConfig) -> Result<Self, GameError> {
        let shape = config.shape();
        let mut builder = GameBuilder::new(&shape).title(config.title.clone());
        for (pl, player) in config.players.iter().enumerate() {
            let id = PlayerId::new(pl as u8);
            builder = builder
                .player_label(id, player.label.clone())
                .strategy_labels(id, player.strategies.iter().cloned());
        }
        if let Some(tables) = &config.payoffs {
            if tables.len() != shape.len() {
                return Err(GameError::TableCount {
                    expected: shape.len(),
                    actual: tables.len(),
                });
            }
            for (pl, table) in tables.iter().enumerate() {
                builder = builder.payoff_table(PlayerId::new(pl as u8), table.clone());
            }
        }
        builder.build()
    }

    /// Identity of this game instance.
    #[must_use]
    pub fn id(&self) -> GameId {
        self.rep.id
    }

    /// True when both handles refer to the same game instance.
    #[must_use]
    pub fn same_game(&self, other: &Game) -> bool {
        Arc::ptr_eq(&self.rep, &other.rep)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.rep.title
    }

    #[must_use]
    pub fn num_players(&self) -> usize {
        self.rep.shape.len()
    }

    /// Strategy count of each player, in player order.
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.rep.shape
    }

    /// Iterate over the players in game order.
    pub fn players(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.num_players())
    }

    /// True if `player` is a player of this game.
    #[must_use]
    pub fn has_player(&self, player: PlayerId) -> bool {
        player.index() < self.num_players()
    }

    #[must_use]
    pub fn player_label(&self, player: PlayerId) -> Option<&str> {
        self.rep.players.try_get(player).map(|p| p.label.as_str())
    }

    /// Number of strategies of `player` (0 for an unknown player).
    #[must_use]
    pub fn num_strategies(&self, player: PlayerId) -> usize {
        self.rep.shape.get(player.index()).copied().unwrap_or(0)
    }

    /// Iterate over a player's strategies in game order.
    pub fn strategies(&self, player: PlayerId) -> impl Iterator<Item = Strategy> {
        let id = self.id();
        (0..self.num_strategies(player)).map(move |n| Strategy::new(id, player, n as u16))
    }

    /// The `number`-th strategy of `player`, if it exists.
    #[must_use]
    pub fn strategy(&self, player: PlayerId, number: usize) -> Option<Strategy> {
        (number < self.num_strategies(player))
            .then(|| Strategy::new(self.id(), player, number as u16))
    }

    /// Look up a strategy of `player` by label. The first match wins.
    #[must_use]
    pub fn strategy_by_label(&self, player: PlayerId, label: &str) -> Option<Strategy> {
        let rep = self.rep.players.try_get(player)?;
        rep.by_label
            .get(label)
            .map(|&n| Strategy::new(self.id(), player, n))
    }

    /// True if `strategy` is a strategy of this game instance.
    #[must_use]
    pub fn owns(&self, strategy: Strategy) -> bool {
        strategy.game() == self.id() && strategy.number() < self.num_strategies(strategy.player())
    }

    #[must_use]
    pub fn strategy_label(&self, strategy: Strategy) -> Option<&str> {
        if !self.owns(strategy) {
            return None;
        }
        self.rep.players[strategy.player()]
            .strategies
            .get(strategy.number())
            .map(String::as_str)
    }

    /// Payoff to `player` at a pure-strategy contingency.
    ///
    /// # Panics
    ///
    /// Panics if the contingency is outside the table or `player` is not a
    /// player of this game. See `try_payoff` for a checked lookup.
    #[must_use]
    pub fn payoff(&self, contingency: &[usize], player: PlayerId) -> f64 {
        match self.try_payoff(contingency, player) {
            Some(payoff) => payoff,
            None => panic!("no payoff for {} at contingency {:?}", player, contingency),
        }
    }

    /// Payoff to `player` at a pure-strategy contingency, if both exist.
    #[must_use]
    pub fn try_payoff(&self, contingency: &[usize], player: PlayerId) -> Option<f64> {
        let index = flat_index(&self.rep.shape, contingency)?;
        self.rep.payoffs.try_get(player).map(|table| table[index])
    }

    /// A support profile containing every strategy of the game.
    #[must_use]
    pub fn support_profile(&self) -> StrategySupportProfile {
        StrategySupportProfile::new(self)
    }
}

impl PartialEq for Game {
    fn eq(&self, other: &Self) -> bool {
        self.same_game(other)
    }
}

impl Eq for Game {}

/// Row-major position of a contingency, or `None` if it is out of range.
fn flat_index(shape: &[usize], contingency: &[usize]) -> Option<usize> {
    if shape.len() != contingency.len() {
        return None;
    }
    shape
        .iter()
        .zip(contingency)
        .try_fold(0usize, |index, (&count, &number)| {
            (number < count).then_some(index * count + number)
        })
}

/// Number of cells of a table with the given shape.
fn table_size(shape: &[usize]) -> Result<usize, GameError> {
    if shape.is_empty() {
        return Err(GameError::NoPlayers);
    }
    if shape.len() > 255 {
        return Err(GameError::TooManyPlayers(shape.len()));
    }
    for (pl, &count) in shape.iter().enumerate() {
        let player = PlayerId::new(pl as u8);
        if count == 0 {
            return Err(GameError::NoStrategies(player));
        }
        if count > usize::from(u16::MAX) {
            return Err(GameError::TooManyStrategies { player, count });
        }
    }
    shape
        .iter()
        .try_fold(1usize, |cells, &count| cells.checked_mul(count))
        .ok_or_else(|| GameError::TableTooLarge(shape.to_vec()))
}

/// Builder for table games.
///
/// Setters never fail; the first problem encountered is remembered and
/// reported by `build`.
#[derive(Clone, Debug)]
pub struct GameBuilder {
    title: String,
    shape: Vec<usize>,
    player_labels: Vec<String>,
    strategy_labels: Vec<Vec<String>>,
    payoffs: Vec<Vec<f64>>,
    cells: usize,
    error: Option<GameError>,
}

impl GameBuilder {
    /// Start a table game with the given strategy counts.
    pub fn new(shape: &[usize]) -> Self {
        let (cells, error) = match table_size(shape) {
            Ok(cells) => (cells, None),
            Err(err) => (0, Some(err)),
        };
        let players = if error.is_some() { 0 } else { shape.len() };

        Self {
            title: String::new(),
            shape: shape.to_vec(),
            player_labels: (1..=players).map(|i| format!("Player {}", i)).collect(),
            strategy_labels: shape[..players]
                .iter()
                .map(|&count| (1..=count).map(|i| i.to_string()).collect())
                .collect(),
            payoffs: vec![vec![0.0; cells]; players],
            cells,
            error,
        }
    }

    fn fail(&mut self, err: GameError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    fn check_player(&mut self, player: PlayerId) -> bool {
        if self.error.is_some() {
            return false;
        }
        if player.index() >= self.shape.len() {
            self.fail(GameError::UnknownPlayer(player));
            return false;
        }
        true
    }

    /// Set the game title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set a player's label.
    #[must_use]
    pub fn player_label(mut self, player: PlayerId, label: impl Into<String>) -> Self {
        if self.check_player(player) {
            self.player_labels[player.index()] = label.into();
        }
        self
    }

    /// Set all strategy labels of a player.
    #[must_use]
    pub fn strategy_labels<S: Into<String>>(
        mut self,
        player: PlayerId,
        labels: impl IntoIterator<Item = S>,
    ) -> Self {
        if !self.check_player(player) {
            return self;
        }
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let expected = self.shape[player.index()];
        if labels.len() == expected {
            self.strategy_labels[player.index()] = labels;
        } else {
            self.fail(GameError::LabelCount {
                player,
                expected,
                actual: labels.len(),
            });
        }
        self
    }

    /// Set every player's payoff at one contingency.
    #[must_use]
    pub fn payoffs(mut self, contingency: &[usize], payoffs: &[f64]) -> Self {
        if self.error.is_some() {
            return self;
        }
        let Some(index) = flat_index(&self.shape, contingency) else {
            self.fail(GameError::ContingencyOutOfRange(contingency.to_vec()));
            return self;
        };
        if payoffs.len() != self.shape.len() {
            self.fail(GameError::PayoffVector {
                expected: self.shape.len(),
                actual: payoffs.len(),
            });
            return self;
        }
        for (table, &payoff) in self.payoffs.iter_mut().zip(payoffs) {
            table[index] = payoff;
        }
        self
    }

    /// Replace a player's whole payoff table (row-major).
    #[must_use]
    pub fn payoff_table(mut self, player: PlayerId, table: Vec<f64>) -> Self {
        if !self.check_player(player) {
            return self;
        }
        if table.len() == self.cells {
            self.payoffs[player.index()] = table;
        } else {
            self.fail(GameError::PayoffCount {
                player,
                expected: self.cells,
                actual: table.len(),
            });
        }
        self
    }

    /// Fill every payoff with seeded random integers from `range`.
    #[must_use]
    pub fn random_payoffs(mut self, seed: u64, range: RangeInclusive<i32>) -> Self {
        if self.error.is_some() {
            return self;
        }
        let rng = PayoffRng::new(seed);
        for (pl, table) in self.payoffs.iter_mut().enumerate() {
            *table = rng
                .for_player(PlayerId::new(pl as u8))
                .gen_table(self.cells, range.clone());
        }
        self
    }

    /// Validate and freeze the game.
    pub fn build(self) -> Result<Game, GameError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let players = self
            .player_labels
            .into_iter()
            .zip(self.strategy_labels)
            .map(|(label, strategies)| PlayerRep::new(label, strategies))
            .collect();

        Ok(Game {
            rep: Arc::new(GameRep {
                id: GameId::allocate(),
                title: self.title,
                shape: self.shape,
                players,
                payoffs: self.payoffs.into_iter().collect(),
            }),
        })
    }
}
