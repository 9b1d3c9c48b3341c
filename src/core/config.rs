//! Game configuration types.
//!
//! A `GameConfig` is a plain, serializable description of a table game:
//! - `PlayerConfig`: a player's label and strategy labels
//! - payoffs: one flattened row-major table per player (optional)
//!
//! `Game::from_config` validates the description and freezes it into a game.

use serde::{Deserialize, Serialize};

/// Configuration for a single player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Human-readable name.
    pub label: String,

    /// Strategy labels, in strategy order. The length is the strategy count.
    pub strategies: Vec<String>,
}

impl PlayerConfig {
    /// Create a player with the given strategy labels.
    pub fn new<S: Into<String>>(
        label: impl Into<String>,
        strategies: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            label: label.into(),
            strategies: strategies.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a player with `count` strategies labelled `"1"`, `"2"`, ...
    pub fn numbered(label: impl Into<String>, count: usize) -> Self {
        Self::new(label, (1..=count).map(|i| i.to_string()))
    }
}

/// Complete description of a table game.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Game title.
    #[serde(default)]
    pub title: String,

    /// Players, in game order.
    pub players: Vec<PlayerConfig>,

    /// Flattened payoff table for each player.
    ///
    /// Tables are row-major over the players' strategies (the last player's
    /// strategy varies fastest). `None` means all payoffs are zero.
    #[serde(default)]
    pub payoffs: Option<Vec<Vec<f64>>>,
}

impl GameConfig {
    /// Create an empty configuration with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Add a player.
    #[must_use]
    pub fn with_player(mut self, player: PlayerConfig) -> Self {
        self.players.push(player);
        self
    }

    /// Set the payoff tables.
    #[must_use]
    pub fn with_payoffs(mut self, payoffs: Vec<Vec<f64>>) -> Self {
        self.payoffs = Some(payoffs);
        self
    }

    /// Strategy count of each player.
    #[must_use]
    pub fn shape(&self) -> Vec<usize> {
        self.players.iter().map(|p| p.strategies.len()).collect()
    }
}
