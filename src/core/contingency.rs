//! Pure-strategy contingencies.
//!
//! A contingency picks one strategy number per player. `Contingencies`
//! walks the cartesian product of per-player choice lists like an odometer:
//! the last player's digit turns fastest, matching the row-major layout of
//! the payoff table.

use smallvec::SmallVec;

/// One strategy number per player, in player order.
pub type Contingency = SmallVec<[usize; 8]>;

/// Odometer over the cartesian product of per-player strategy choices.
///
/// ```
/// use rust_nfg::core::Contingencies;
///
/// let all: Vec<_> = Contingencies::new(vec![vec![0, 2], vec![1]])
///     .map(|c| c.to_vec())
///     .collect();
/// assert_eq!(all, vec![vec![0, 1], vec![2, 1]]);
/// ```
#[derive(Clone, Debug)]
pub struct Contingencies {
    choices: Vec<Vec<usize>>,
    digits: SmallVec<[usize; 8]>,
    exhausted: bool,
}

impl Contingencies {
    /// Iterate over every combination of `choices`.
    ///
    /// Yields nothing if any player has no choices.
    pub fn new(choices: Vec<Vec<usize>>) -> Self {
        let exhausted = choices.iter().any(Vec::is_empty);
        let digits = SmallVec::from_elem(0, choices.len());
        Self {
            choices,
            digits,
            exhausted,
        }
    }

    fn current(&self) -> Contingency {
        self.digits
            .iter()
            .zip(&self.choices)
            .map(|(&digit, choices)| choices[digit])
            .collect()
    }

    fn advance(&mut self) {
        for player in (0..self.choices.len()).rev() {
            self.digits[player] += 1;
            if self.digits[player] < self.choices[player].len() {
                return;
            }
            self.digits[player] = 0;
        }
        self.exhausted = true;
    }
}

impl Iterator for Contingencies {
    type Item = Contingency;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let current = self.current();
        self.advance();
        Some(current)
    }
}
