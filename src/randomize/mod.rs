//! Randomization strategies for the administration sequence
//!
//! A trial assigns one treatment per period; the order is drawn by one of
//! three strategies:
//!
//! | Strategy | Behavior |
//! |----------|----------|
//! | [Strategy::Permutation] | Appends random permutations of the full treatment set block-wise |
//! | [Strategy::MaxRep] | Uniform draws, capping immediate repetitions of the same treatment |
//! | [Strategy::Custom] | Caller-supplied sequence, validated for length and membership |
//!
//! The generator is injected by the caller, so tests can seed it and
//! concurrent invocations never share state:
//!
//! ```
//! use nof1::Strategy;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let labels = vec!["VER".to_string(), "PLA".to_string()];
//! let mut rng = StdRng::seed_from_u64(7);
//! let sequence = Strategy::Permutation.randomize(&labels, 6, &mut rng).unwrap();
//! assert_eq!(sequence.len(), 6);
//! ```
//!
//! Only [Strategy::Permutation] (or an equivalent custom sequence) produces
//! the balanced cycles required by the cycle-effect analysis variant.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from strategy parameter validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RandomizeError {
    /// The trial must have at least one period
    #[error("A trial requires at least one period, got {0}")]
    TooFewPeriods(usize),

    /// The trial must compare at least two treatments
    #[error("A trial requires at least two treatments, got {0}")]
    TooFewTreatments(usize),

    /// The repetition cap must allow at least one occurrence
    #[error("The repetition cap must be at least 1, got {0}")]
    InvalidCap(usize),

    /// A custom sequence must cover every period exactly once
    #[error("Custom sequence has {got} entries, expected {expected}")]
    CustomLength { expected: usize, got: usize },

    /// A custom sequence referenced a label outside the treatment set
    #[error("Custom sequence references unknown treatment '{0}'")]
    UnknownLabel(String),
}

/// How the administration sequence is drawn
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Block-wise random permutations of the full treatment set
    ///
    /// Every complete block of `|treatments|` periods contains each
    /// treatment exactly once; the final block is truncated when the period
    /// count is not a multiple of the treatment count.
    Permutation,
    /// Uniform draws with a cap on immediate repetitions
    ///
    /// No treatment ever appears more than `cap` times in direct
    /// succession. Once the running repetition reaches the cap, the
    /// preceding treatment is removed from the candidate pool for the next
    /// draw, so generation terminates without rejection loops.
    MaxRep { cap: usize },
    /// A caller-supplied sequence, used verbatim after validation
    Custom { sequence: Vec<String> },
}

impl Strategy {
    /// Produce an administration sequence of one treatment label per period
    ///
    /// # Arguments
    ///
    /// * `labels` - The trial's treatment abbreviations (at least two)
    /// * `periods` - Number of periods to cover (at least one)
    /// * `rng` - Source of randomness; seeded by tests for reproducibility
    pub fn randomize(
        &self,
        labels: &[String],
        periods: usize,
        rng: &mut impl Rng,
    ) -> Result<Vec<String>, RandomizeError> {
        if periods < 1 {
            return Err(RandomizeError::TooFewPeriods(periods));
        }
        if labels.len() < 2 {
            return Err(RandomizeError::TooFewTreatments(labels.len()));
        }
        match self {
            Strategy::Permutation => Ok(permutation(labels, periods, rng)),
            Strategy::MaxRep { cap } => {
                if *cap < 1 {
                    return Err(RandomizeError::InvalidCap(*cap));
                }
                Ok(max_rep(labels, periods, *cap, rng))
            }
            Strategy::Custom { sequence } => {
                if sequence.len() != periods {
                    return Err(RandomizeError::CustomLength {
                        expected: periods,
                        got: sequence.len(),
                    });
                }
                if let Some(unknown) = sequence.iter().find(|label| !labels.contains(label)) {
                    return Err(RandomizeError::UnknownLabel(unknown.clone()));
                }
                Ok(sequence.clone())
            }
        }
    }
}

fn permutation(labels: &[String], periods: usize, rng: &mut impl Rng) -> Vec<String> {
    let mut sequence = Vec::with_capacity(periods);
    let mut block: Vec<&String> = labels.iter().collect();
    while sequence.len() < periods {
        block.shuffle(rng);
        for label in &block {
            if sequence.len() == periods {
                break;
            }
            sequence.push((*label).clone());
        }
    }
    sequence
}

fn max_rep(labels: &[String], periods: usize, cap: usize, rng: &mut impl Rng) -> Vec<String> {
    let mut sequence: Vec<String> = Vec::with_capacity(periods);
    let mut run = 0usize;
    for _ in 0..periods {
        let pick = match sequence.last() {
            // The run has hit the cap: draw uniformly among the others.
            Some(prev) if run >= cap => {
                let pool: Vec<&String> = labels.iter().filter(|label| *label != prev).collect();
                pool[rng.random_range(0..pool.len())].clone()
            }
            _ => labels[rng.random_range(0..labels.len())].clone(),
        };
        run = match sequence.last() {
            Some(prev) if *prev == pick => run + 1,
            _ => 1,
        };
        sequence.push(pick);
    }
    sequence
}
