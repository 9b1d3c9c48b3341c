//! Strategy supports and iterated dominance elimination.
//!
//! ## Overview
//!
//! - `StrategySupportProfile`: immutable per-player strategy subsets of a
//!   game with set algebra (`-`, `&`, `|`, subset order)
//! - `undominated_strategies_solve`: one pass of dominated-strategy
//!   elimination; callers iterate to a fixed point
//! - `DominanceOracle`: pluggable dominance relation, with payoff dominance
//!   (`DominanceConfig`) and overwhelming (`Overwhelming`) provided
//!
//! ## Usage
//!
//! ```rust
//! use rust_nfg::core::Game;
//! use rust_nfg::support::{undominated_strategies_solve, UndominatedSteps};
//!
//! let game = Game::builder(&[2, 2]).random_payoffs(3, -5..=5).build().unwrap();
//! let full = game.support_profile();
//!
//! // One pass
//! let reduced = undominated_strategies_solve(&full);
//! assert!(reduced <= full);
//!
//! // Every pass until nothing changes
//! let fixed = UndominatedSteps::new(&full).fixed_point();
//! assert_eq!(undominated_strategies_solve(&fixed), fixed);
//! ```

pub mod config;
pub mod dominance;
pub mod error;
pub mod profile;
pub mod solve;

pub use config::{DominanceConfig, DominanceCriterion};
pub use dominance::{
    dominates, is_dominated, opponent_contingencies, overwhelms, DominanceOracle, Overwhelming,
};
pub use error::{ErrorKind, RemoveFailure, SupportError};
pub use profile::{Iter, StrategySupportProfile};
pub use solve::{
    undominated_for_player, undominated_strategies_solve, undominated_strategies_solve_with,
    UndominatedSteps,
};
