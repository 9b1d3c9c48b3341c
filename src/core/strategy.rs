//! Strategy identity.
//!
//! A `Strategy` names one slot of one player of one game instance. Identity
//! is positional: labels and payoffs never take part in equality, so two
//! strategies from separately built games never compare equal even when the
//! games are defined identically.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use super::PlayerId;

static NEXT_GAME_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a game instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GameId(pub u64);

impl GameId {
    /// Allocate a fresh identifier.
    pub(crate) fn allocate() -> Self {
        Self(NEXT_GAME_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Game({})", self.0)
    }
}

/// A pure strategy of a player.
///
/// Ordering follows game order: by game, then player, then strategy number.
///
/// ```
/// use rust_nfg::core::{Game, PlayerId};
///
/// let game = Game::new_table(&[2, 3]).unwrap();
/// let first = game.strategy(PlayerId::new(1), 0).unwrap();
/// let last = game.strategy(PlayerId::new(1), 2).unwrap();
///
/// assert_eq!(first.player(), PlayerId::new(1));
/// assert_eq!(last.number(), 2);
/// assert!(first < last);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Strategy {
    game: GameId,
    player: PlayerId,
    number: u16,
}

impl Strategy {
    pub(crate) const fn new(game: GameId, player: PlayerId, number: u16) -> Self {
        Self {
            game,
            player,
            number,
        }
    }

    /// The game this strategy belongs to.
    #[must_use]
    pub const fn game(self) -> GameId {
        self.game
    }

    /// The player owning this strategy.
    #[must_use]
    pub const fn player(self) -> PlayerId {
        self.player
    }

    /// Position of the strategy within its player's strategy list (0-based).
    #[must_use]
    pub const fn number(self) -> usize {
        self.number as usize
    }

    pub(crate) const fn raw_number(self) -> u16 {
        self.number
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Strategy({}, P{}, {})", self.game.0, self.player.0, self.number)
    }
}
