//! Core type bindings for Python: games, players and strategies.

use numpy::PyReadonlyArrayDyn;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyTuple;

use crate::core::{Game, PlayerId, Strategy};

use super::py_support::PyStrategySupportProfile;

/// Python wrapper for Game.
#[pyclass(name = "Game")]
#[derive(Clone, Debug)]
pub struct PyGame(pub Game);

#[pymethods]
impl PyGame {
    /// Create a table game with all payoffs zero.
    ///
    /// # Arguments
    /// - dims: number of strategies of each player
    /// - title: optional game title
    #[staticmethod]
    #[pyo3(signature = (dims, title = None))]
    fn new_table(dims: Vec<usize>, title: Option<String>) -> PyResult<Self> {
        let game = Game::builder(&dims).title(title.unwrap_or_default()).build()?;
        Ok(Self(game))
    }

    /// Create a game from one payoff array per player.
    ///
    /// All arrays must share the same shape; axis `i` indexes player `i`'s
    /// strategies.
    #[staticmethod]
    #[pyo3(signature = (*arrays))]
    fn from_arrays(py: Python<'_>, arrays: &Bound<'_, PyTuple>) -> PyResult<Self> {
        let numpy = py.import_bound("numpy")?;
        let mut shape: Option<Vec<usize>> = None;
        let mut tables = Vec::with_capacity(arrays.len());

        for item in arrays.iter() {
            let converted = numpy.call_method1("asarray", (item, "float64"))?;
            let array: PyReadonlyArrayDyn<'_, f64> = converted.extract()?;
            let view = array.as_array();
            let this_shape = view.shape().to_vec();
            match &shape {
                Some(expected) if *expected != this_shape => {
                    return Err(PyValueError::new_err(format!(
                        "payoff arrays must share a shape: {:?} vs {:?}",
                        expected, this_shape
                    )));
                }
                Some(_) => {}
                None => shape = Some(this_shape),
            }
            tables.push(view.iter().copied().collect());
        }

        let shape =
            shape.ok_or_else(|| PyValueError::new_err("at least one payoff array is required"))?;
        Ok(Self(Game::from_arrays(&shape, tables)?))
    }

    #[getter]
    fn title(&self) -> String {
        self.0.title().to_string()
    }

    /// Players in game order.
    #[getter]
    fn players(&self) -> Vec<PyPlayer> {
        self.0
            .players()
            .map(|id| PyPlayer {
                game: self.0.clone(),
                id,
            })
            .collect()
    }

    /// Payoff to a player at a pure-strategy contingency.
    fn payoff(&self, contingency: Vec<usize>, player: &PyPlayer) -> PyResult<f64> {
        self.0
            .try_payoff(&contingency, player.id)
            .ok_or_else(|| PyValueError::new_err(format!("no payoff at {:?}", contingency)))
    }

    /// The support profile containing every strategy.
    fn support_profile(&self) -> PyStrategySupportProfile {
        PyStrategySupportProfile(self.0.support_profile())
    }

    fn __repr__(&self) -> String {
        format!("Game(title={:?}, shape={:?})", self.0.title(), self.0.shape())
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        self.0.id().raw()
    }
}

/// Python wrapper for a player of a game.
#[pyclass(name = "Player")]
#[derive(Clone, Debug)]
pub struct PyPlayer {
    game: Game,
    id: PlayerId,
}

#[pymethods]
impl PyPlayer {
    /// Get the player index (0-based).
    #[getter]
    fn number(&self) -> usize {
        self.id.index()
    }

    #[getter]
    fn label(&self) -> String {
        self.game.player_label(self.id).unwrap_or_default().to_string()
    }

    /// Strategies in game order.
    #[getter]
    fn strategies(&self) -> Vec<PyStrategy> {
        self.game
            .strategies(self.id)
            .map(|s| PyStrategy::wrap(&self.game, s))
            .collect()
    }

    fn __repr__(&self) -> String {
        format!("Player({}, {:?})", self.id.0, self.label())
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.game == other.game && self.id == other.id
    }

    fn __hash__(&self) -> u64 {
        (self.game.id().raw() << 8) | u64::from(self.id.0)
    }
}

/// Python wrapper for Strategy.
#[pyclass(name = "Strategy")]
#[derive(Clone, Debug)]
pub struct PyStrategy {
    game: Game,
    pub(crate) inner: Strategy,
}

impl PyStrategy {
    pub(crate) fn wrap(game: &Game, inner: Strategy) -> Self {
        Self {
            game: game.clone(),
            inner,
        }
    }
}

#[pymethods]
impl PyStrategy {
    /// Position within the player's strategies (0-based).
    #[getter]
    fn number(&self) -> usize {
        self.inner.number()
    }

    #[getter]
    fn label(&self) -> String {
        self.game.strategy_label(self.inner).unwrap_or_default().to_string()
    }

    #[getter]
    fn player(&self) -> PyPlayer {
        PyPlayer {
            game: self.game.clone(),
            id: self.inner.player(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Strategy(player={}, number={}, label={:?})",
            self.inner.player().0,
            self.inner.number(),
            self.label()
        )
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.inner == other.inner
    }

    fn __hash__(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        let mut hasher = DefaultHasher::new();
        self.inner.hash(&mut hasher);
        hasher.finish()
    }
}
