//! Treatment-effect analysis of collected outcome data
//!
//! Once outcome data has accumulated, [analyze] estimates the effect of
//! each treatment on a monitored variable and decomposes the observed
//! variance. Three procedures are available:
//!
//! | Variant | Model |
//! |---------|-------|
//! | [AnalysisVariant::Naive] | One-way ANOVA, treatment as sole factor |
//! | [AnalysisVariant::Cycle] | Two-way ANOVA, treatment crossed with randomization cycle |
//! | [AnalysisVariant::Autoregression] | ANCOVA with the lag-1 preceding observation as covariate |
//!
//! All variants share the same preprocessing: the variable is parsed
//! numerically (empty or non-numeric values are missing), and the first
//! `skipped_run_in_days` days of every period are excluded as washout.
//! Each analysis is a single O(n) pass over the outcome points; every
//! statistic is derived from per-cell count/sum/sum-of-squares moments.
//!
//! Results are computed fresh per query and never persisted. A treatment
//! without included observations degenerates to `NaN` rather than an
//! error, so the remaining strata stay usable; check
//! [AnalysisResult::is_degenerate] before presenting the numbers.
//!
//! ```rust,ignore
//! use nof1::*;
//!
//! let result = analyze(
//!     AnalysisVariant::Naive,
//!     design.treatments(),
//!     &trial.schedule,
//!     &outcomes,
//!     &AnalysisVariable::new("pain_score", 2),
//! )?;
//! for effect in &result.effects {
//!     println!("{}: {:.2}", effect.treatment, effect.estimate);
//! }
//! println!("p = {:.4}", result.treatment.p_value.unwrap());
//! ```

mod ancova;
mod cycle;
mod error;
mod moments;
mod naive;
pub(crate) mod preprocess;
pub mod summary;
mod types;


pub use error::AnalysisError;
pub use types::{AnalysisResult, AnalysisVariant, TreatmentEffect, VarianceSource};

use crate::data::{AnalysisVariable, OutcomeDataPoint, Treatment};
use crate::schedule::Schedule;

/// Estimate treatment effects and decompose the variance
///
/// # Arguments
///
/// * `variant` - The analysis procedure to run
/// * `treatments` - The trial's treatment list; outcome points must
///   reference members of it
/// * `schedule` - The administration plan, providing period geometry and,
///   for the cycle variant, the randomized sequence
/// * `outcomes` - Collected outcome data points, in any order
/// * `variable` - The monitored variable to analyze and its run-in window
pub fn analyze(
    variant: AnalysisVariant,
    treatments: &[Treatment],
    schedule: &Schedule,
    outcomes: &[OutcomeDataPoint],
    variable: &AnalysisVariable,
) -> Result<AnalysisResult, AnalysisError> {
    // Treatment df is |treatments| - 1; a single arm has no contrast to test.
    if treatments.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            n: treatments.len(),
            required: 2,
        });
    }
    let observations = preprocess::collect(treatments, schedule, outcomes, variable)?;
    match variant {
        AnalysisVariant::Naive => naive::analyze(treatments, &observations),
        AnalysisVariant::Cycle => cycle::analyze(treatments, schedule, &observations),
        AnalysisVariant::Autoregression => ancova::analyze(treatments, &observations),
    }
}
