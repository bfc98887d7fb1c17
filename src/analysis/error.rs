//! Analysis error types

use thiserror::Error;

/// Errors that can occur during treatment-effect analysis
///
/// All variants are deterministic given the inputs; none are transient.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// An outcome point referenced a treatment outside the trial's set
    #[error("Outcome data references unknown treatment '{0}'")]
    UnknownTreatment(String),

    /// Cycle analysis was requested on a sequence without balanced cycles
    ///
    /// Only the permutation strategy (or an equivalent custom sequence)
    /// guarantees that every complete block of `|treatments|` periods
    /// contains each treatment exactly once.
    #[error("Cycle analysis requires a sequence of balanced treatment cycles")]
    IncompatibleRandomization,

    /// Too little data for the requested model
    ///
    /// Raised when the degrees of freedom would become non-positive, either
    /// from too few included observations or too few treatments.
    #[error("Insufficient data: have {n}, need at least {required}")]
    InsufficientData { n: usize, required: usize },

    /// Cycle analysis needs at least two complete cycles
    #[error("Cycle analysis requires at least two complete cycles, found {0}")]
    TooFewCycles(usize),
}
