//! Support profile and dominance bindings for Python.

use pyo3::basic::CompareOp;
use pyo3::exceptions::PyIndexError;
use pyo3::prelude::*;

use crate::support::{
    self, DominanceConfig, DominanceCriterion, StrategySupportProfile,
};

use super::py_core::{PyGame, PyStrategy};

/// Python wrapper for StrategySupportProfile.
///
/// Immutable: `remove` and the set operators return new profiles.
#[pyclass(name = "StrategySupportProfile")]
#[derive(Clone, Debug)]
pub struct PyStrategySupportProfile(pub StrategySupportProfile);

#[pymethods]
impl PyStrategySupportProfile {
    /// The game this profile is defined on.
    #[getter]
    fn game(&self) -> PyGame {
        PyGame(self.0.game().clone())
    }

    fn __len__(&self) -> usize {
        self.0.len()
    }

    fn __contains__(&self, strategy: &PyStrategy) -> bool {
        self.0.contains(strategy.inner)
    }

    /// Strategy at a position; negative indices count from the end.
    fn __getitem__(&self, index: isize) -> PyResult<PyStrategy> {
        let len = self.0.len() as isize;
        let resolved = if index < 0 { index + len } else { index };
        if resolved < 0 {
            return Err(PyIndexError::new_err(format!(
                "index {} out of range for a support of {} strategies",
                index, len
            )));
        }
        let strategy = self.0.get(resolved as usize)?;
        Ok(PyStrategy::wrap(self.0.game(), strategy))
    }

    fn __iter__(slf: PyRef<'_, Self>) -> PyResult<Py<PyStrategyIterator>> {
        let strategies: Vec<PyStrategy> = slf
            .0
            .iter()
            .map(|s| PyStrategy::wrap(slf.0.game(), s))
            .collect();
        Py::new(slf.py(), PyStrategyIterator { strategies, index: 0 })
    }

    /// A copy of this profile without `strategy`.
    ///
    /// Raises UndefinedOperationError if the strategy is absent or is the
    /// last one of its player.
    fn remove(&self, strategy: &PyStrategy) -> PyResult<Self> {
        Ok(Self(self.0.remove(strategy.inner)?))
    }

    fn difference(&self, other: &Self) -> PyResult<Self> {
        Ok(Self(self.0.difference(&other.0)?))
    }

    fn intersection(&self, other: &Self) -> PyResult<Self> {
        Ok(Self(self.0.intersection(&other.0)?))
    }

    fn union(&self, other: &Self) -> PyResult<Self> {
        Ok(Self(self.0.union(&other.0)?))
    }

    fn issubset(&self, other: &Self) -> PyResult<bool> {
        Ok(self.0.is_subset_of(&other.0)?)
    }

    fn issuperset(&self, other: &Self) -> PyResult<bool> {
        Ok(self.0.is_superset_of(&other.0)?)
    }

    fn __sub__(&self, other: &Self) -> PyResult<Self> {
        self.difference(other)
    }

    fn __and__(&self, other: &Self) -> PyResult<Self> {
        self.intersection(other)
    }

    fn __or__(&self, other: &Self) -> PyResult<Self> {
        self.union(other)
    }

    fn __richcmp__(&self, other: &Self, op: CompareOp) -> PyResult<bool> {
        match op {
            CompareOp::Eq => Ok(self.0 == other.0),
            CompareOp::Ne => Ok(self.0 != other.0),
            CompareOp::Le => self.issubset(other),
            CompareOp::Ge => self.issuperset(other),
            CompareOp::Lt => Ok(self.issubset(other)? && self.0 != other.0),
            CompareOp::Gt => Ok(self.issuperset(other)? && self.0 != other.0),
        }
    }

    fn __repr__(&self) -> String {
        format!("StrategySupportProfile({})", self.0)
    }
}

/// Iterator over the strategies of a support profile.
#[pyclass]
pub struct PyStrategyIterator {
    strategies: Vec<PyStrategy>,
    index: usize,
}

#[pymethods]
impl PyStrategyIterator {
    fn __iter__(slf: PyRef<'_, Self>) -> PyRef<'_, Self> {
        slf
    }

    fn __next__(mut slf: PyRefMut<'_, Self>) -> Option<PyStrategy> {
        let strategy = slf.strategies.get(slf.index).cloned();
        if strategy.is_some() {
            slf.index += 1;
        }
        strategy
    }
}

/// Remove dominated strategies from a support profile (one pass).
///
/// # Arguments
/// - profile: the support to reduce
/// - strict: strict dominance if true, weak dominance otherwise
/// - external: allow dominators from outside the support
#[pyfunction]
#[pyo3(signature = (profile, strict = true, external = false))]
pub fn undominated_strategies_solve(
    profile: &PyStrategySupportProfile,
    strict: bool,
    external: bool,
) -> PyStrategySupportProfile {
    let criterion = if strict {
        DominanceCriterion::Strict
    } else {
        DominanceCriterion::Weak
    };
    let config = DominanceConfig::default()
        .with_criterion(criterion)
        .with_external(external);
    PyStrategySupportProfile(support::undominated_strategies_solve_with(&profile.0, &config))
}
