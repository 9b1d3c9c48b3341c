//! Core game types: players, strategies, table games, contingencies,
//! configuration and seeded payoff generation.
//!
//! Everything here is immutable once built; support profiles and the
//! dominance reducer only read from a `Game`.

pub mod config;
pub mod contingency;
pub mod game;
pub mod player;
pub mod rng;
pub mod strategy;

pub use config::{GameConfig, PlayerConfig};
pub use contingency::{Contingencies, Contingency};
pub use game::{Game, GameBuilder, GameError};
pub use player::{PlayerId, PlayerMap};
pub use rng::PayoffRng;
pub use strategy::{GameId, Strategy};
