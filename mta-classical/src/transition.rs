//! Touchpoint transition matrices
//!
//! Cell `(i, j)` starts as the number of times touchpoint `i` occurs anywhere
//! before touchpoint `j` on the same path, summed over all paths. Each row is
//! then divided by its sum, so row `i` is the distribution of touchpoints that
//! follow `i`. A touchpoint that never precedes another keeps an all-zero row.

use std::collections::HashMap;

use num_traits::{One, Zero};
use tracing::debug;

use mta_core::{Contribution, Touchpoint, Value, all_touchpoints, to_sets, value};

/// Row-stochastic matrix of transitions between touchpoints
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionMatrix {
    touchpoints: Vec<Touchpoint>,
    index: HashMap<Touchpoint, usize>,
    probabilities: Vec<Vec<Value>>,
}

impl TransitionMatrix {
    /// Build the matrix from ordered paths
    ///
    /// Indices follow the first-seen order of touchpoints in the set
    /// projection of `contributions`.
    pub fn build(contributions: &[Contribution]) -> Self {
        let touchpoints = all_touchpoints(&to_sets(contributions));
        let index: HashMap<Touchpoint, usize> = touchpoints
            .iter()
            .enumerate()
            .map(|(i, touchpoint)| (touchpoint.clone(), i))
            .collect();

        let size = touchpoints.len();
        let mut counts = vec![vec![0u64; size]; size];
        for contribution in contributions {
            let path: Vec<usize> = contribution
                .touchpoints()
                .iter()
                .map(|touchpoint| index[touchpoint])
                .collect();
            for (i, &from) in path.iter().enumerate() {
                for &to in &path[i + 1..] {
                    counts[from][to] += 1;
                }
            }
        }

        let probabilities = counts.into_iter().map(normalize_row).collect();
        debug!(touchpoints = size, paths = contributions.len(), "Built transition matrix");

        Self {
            touchpoints,
            index,
            probabilities,
        }
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.touchpoints.len()
    }

    /// Touchpoints in index order
    pub fn touchpoints(&self) -> &[Touchpoint] {
        &self.touchpoints
    }

    /// Touchpoint-to-index map
    pub fn index(&self) -> &HashMap<Touchpoint, usize> {
        &self.index
    }

    pub fn index_of(&self, touchpoint: &Touchpoint) -> Option<usize> {
        self.index.get(touchpoint).copied()
    }

    /// Dense probability rows, indexed like [`touchpoints`](Self::touchpoints)
    pub fn probabilities(&self) -> &[Vec<Value>] {
        &self.probabilities
    }

    /// Probability that `to` follows `from`
    pub fn probability(&self, from: &Touchpoint, to: &Touchpoint) -> Option<&Value> {
        let row = self.index_of(from)?;
        let column = self.index_of(to)?;
        Some(&self.probabilities[row][column])
    }

    pub fn row_sum(&self, row: usize) -> Value {
        self.probabilities[row]
            .iter()
            .fold(value::zero(), |total, p| total + p)
    }

    /// True when every row sums to exactly one or exactly zero
    pub fn is_row_stochastic(&self) -> bool {
        (0..self.size()).all(|row| {
            let sum = self.row_sum(row);
            sum.is_one() || sum.is_zero()
        })
    }
}

/// Build the transition matrix of `contributions`
pub fn transition_matrix(contributions: &[Contribution]) -> TransitionMatrix {
    TransitionMatrix::build(contributions)
}

fn normalize_row(counts: Vec<u64>) -> Vec<Value> {
    let total: u64 = counts.iter().sum();
    if total == 0 {
        return counts.iter().map(|_| value::zero()).collect();
    }
    counts
        .into_iter()
        .map(|count| Value::new(count.into(), total.into()))
        .collect()
}
