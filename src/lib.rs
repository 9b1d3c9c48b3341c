//! # rust-nfg
//!
//! Strategy supports and iterated elimination of dominated strategies for
//! strategic-form (normal-form) games.
//!
//! ## Design Principles
//!
//! 1. **Immutable Values**: Games are frozen once built and shared behind an
//!    `Arc`; support profiles are never mutated in place. Every set operation
//!    returns a new profile and leaves its operands usable.
//!
//! 2. **Positional Identity**: A strategy is (game, player, number). Labels
//!    and payoffs never take part in equality, and profiles over different
//!    game instances never combine.
//!
//! 3. **Caller-Owned Iteration**: The dominance reducer runs one pass per
//!    call. Iterating to a fixed point is the caller's loop (or
//!    `UndominatedSteps`, which yields each pass).
//!
//! ## Modules
//!
//! - `core`: Players, strategies, table games, contingencies, configuration
//! - `support`: Support profiles, dominance oracles, the one-step reducer
//! - `python`: PyO3 bindings (feature `python`)

pub mod core;
pub mod support;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Contingencies, Contingency, Game, GameBuilder, GameConfig, GameError, GameId, PayoffRng,
    PlayerConfig, PlayerId, PlayerMap, Strategy,
};

pub use crate::support::{
    dominates, is_dominated, overwhelms, undominated_for_player, undominated_strategies_solve,
    undominated_strategies_solve_with, DominanceConfig, DominanceCriterion, DominanceOracle,
    ErrorKind, Overwhelming, RemoveFailure, StrategySupportProfile, SupportError,
    UndominatedSteps,
};
