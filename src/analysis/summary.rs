//! Descriptive statistics per treatment
//!
//! Presentation collaborators show these next to the inferential results:
//! per treatment, the count, mean, SD, CV%, and range of the analyzed
//! variable over included observations.

use serde::{Deserialize, Serialize};

use crate::analysis::error::AnalysisError;
use crate::analysis::moments::{Moments, Strata};
use crate::analysis::preprocess;
use crate::data::{AnalysisVariable, OutcomeDataPoint, Treatment};
use crate::schedule::Schedule;

/// Descriptive statistics for one treatment
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TreatmentSummary {
    /// Treatment abbreviation
    pub treatment: String,
    /// Included, non-missing observations
    pub n: usize,
    /// Arithmetic mean (`NaN` when `n` is 0)
    pub mean: f64,
    /// Sample standard deviation (`NaN` when `n` < 2)
    pub sd: f64,
    /// Coefficient of variation in percent
    pub cv_pct: f64,
    /// Smallest included value
    pub min: f64,
    /// Largest included value
    pub max: f64,
}

/// Summarize the analyzed variable per treatment
///
/// Applies the same inclusion rules as the analysis variants: run-in days
/// and missing values are excluded. Treatments without included
/// observations report `NaN` statistics.
pub fn summarize(
    treatments: &[Treatment],
    schedule: &Schedule,
    outcomes: &[OutcomeDataPoint],
    variable: &AnalysisVariable,
) -> Result<Vec<TreatmentSummary>, AnalysisError> {
    let observations = preprocess::collect(treatments, schedule, outcomes, variable)?;

    let mut by_treatment: Strata<usize> = Strata::new();
    let mut ranges: Vec<(f64, f64)> = vec![(f64::INFINITY, f64::NEG_INFINITY); treatments.len()];
    for obs in &observations {
        if !obs.contributes() {
            continue;
        }
        by_treatment.push(obs.treatment, obs.value);
        let range = &mut ranges[obs.treatment];
        range.0 = range.0.min(obs.value);
        range.1 = range.1.max(obs.value);
    }

    let mut summaries = Vec::with_capacity(treatments.len());
    for (index, treatment) in treatments.iter().enumerate() {
        let cell = by_treatment.cell(&index);
        summaries.push(build_summary(treatment.abbreviation(), &cell, ranges[index]));
    }
    Ok(summaries)
}

fn build_summary(treatment: &str, cell: &Moments, range: (f64, f64)) -> TreatmentSummary {
    let mean = cell.mean();
    let sd = if cell.n > 1 {
        (cell.centered_sum_sq() / (cell.count() - 1.0)).sqrt()
    } else {
        f64::NAN
    };
    let cv_pct = if mean.abs() > f64::EPSILON {
        (sd / mean).abs() * 100.0
    } else {
        f64::NAN
    };
    let (min, max) = if cell.n > 0 {
        range
    } else {
        (f64::NAN, f64::NAN)
    };
    TreatmentSummary {
        treatment: treatment.to_string(),
        n: cell.n,
        mean,
        sd,
        cv_pct,
        min,
        max,
    }
}
