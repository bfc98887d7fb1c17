//! Stratified moment accumulation
//!
//! All three analysis variants make a single pass over the outcome stream,
//! accumulating count, sum, and sum of squares per stratification cell, and
//! derive every reported statistic from those moments. The variants differ
//! only in the key they stratify by and in how the sums of squares combine.

use std::collections::HashMap;
use std::hash::Hash;

/// Count, sum, and sum of squares for one cell
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Moments {
    pub n: usize,
    pub sum: f64,
    pub sum_sq: f64,
}

impl Moments {
    pub fn push(&mut self, x: f64) {
        self.n += 1;
        self.sum += x;
        self.sum_sq += x * x;
    }

    pub fn count(&self) -> f64 {
        self.n as f64
    }

    /// Cell mean; `NaN` for an empty cell, which deliberately propagates
    pub fn mean(&self) -> f64 {
        self.sum / self.n as f64
    }

    /// Sum of squares about the cell mean
    pub fn centered_sum_sq(&self) -> f64 {
        self.sum_sq - self.count() * self.mean() * self.mean()
    }
}

/// Moments per stratification cell, keyed by small index tuples
#[derive(Debug, Clone, Default)]
pub(crate) struct Strata<K: Eq + Hash> {
    cells: HashMap<K, Moments>,
}

impl<K: Eq + Hash> Strata<K> {
    pub fn new() -> Self {
        Strata {
            cells: HashMap::new(),
        }
    }

    pub fn push(&mut self, key: K, x: f64) {
        self.cells.entry(key).or_default().push(x);
    }

    /// Get a cell's moments; an absent cell reads as empty (n = 0)
    pub fn cell(&self, key: &K) -> Moments {
        self.cells.get(key).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &Moments)> {
        self.cells.iter()
    }
}
