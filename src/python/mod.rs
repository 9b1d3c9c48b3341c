//! Python bindings for rust-nfg.
//!
//! This module provides PyO3 bindings for building strategic-form games,
//! manipulating support profiles and eliminating dominated strategies.
//!
//! # Quick Start
//!
//! ```python
//! import rust_nfg as nfg
//!
//! game = nfg.Game.new_table([3, 2])
//! full = game.support_profile()
//!
//! # Supports are immutable; operators return new profiles
//! smaller = full.remove(game.players[1].strategies[0])
//! assert smaller <= full
//!
//! # Iterate one-step elimination to a fixed point
//! profile = full
//! step = nfg.supports.undominated_strategies_solve(profile)
//! while step != profile:
//!     profile = step
//!     step = nfg.supports.undominated_strategies_solve(profile)
//! ```
//!
//! Errors map to Python exceptions by kind: `UndefinedOperationError` for
//! invalid removals, `ValueError` for incompatible or emptying set
//! operations, `IndexError` for positional access.

use pyo3::create_exception;
use pyo3::exceptions::{PyException, PyIndexError, PyValueError};
use pyo3::prelude::*;

use crate::core::GameError;
use crate::support::{ErrorKind, SupportError};

mod py_core;
mod py_support;

pub use py_core::*;
pub use py_support::*;

create_exception!(
    rust_nfg,
    UndefinedOperationError,
    PyException,
    "Operation is not defined for the given support profile."
);

impl From<SupportError> for PyErr {
    fn from(err: SupportError) -> Self {
        match err.kind() {
            ErrorKind::UndefinedOperation => UndefinedOperationError::new_err(err.to_string()),
            ErrorKind::Value => PyValueError::new_err(err.to_string()),
            ErrorKind::Index => PyIndexError::new_err(err.to_string()),
        }
    }
}

impl From<GameError> for PyErr {
    fn from(err: GameError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// rust-nfg: strategy supports for strategic-form games.
///
/// This module provides:
/// - Game, Player and Strategy
/// - StrategySupportProfile with set algebra
/// - supports.undominated_strategies_solve
#[pymodule]
fn rust_nfg(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core types
    m.add_class::<PyGame>()?;
    m.add_class::<PyPlayer>()?;
    m.add_class::<PyStrategy>()?;

    // Supports
    m.add_class::<PyStrategySupportProfile>()?;
    m.add_class::<PyStrategyIterator>()?;
    m.add(
        "UndefinedOperationError",
        m.py().get_type_bound::<UndefinedOperationError>(),
    )?;

    let supports = PyModule::new_bound(m.py(), "supports")?;
    supports.add_function(wrap_pyfunction!(undominated_strategies_solve, &supports)?)?;
    m.add_submodule(&supports)?;

    Ok(())
}
