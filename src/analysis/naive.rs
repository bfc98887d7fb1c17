//! One-way ANOVA with treatment as the sole factor

use crate::analysis::error::AnalysisError;
use crate::analysis::moments::{Moments, Strata};
use crate::analysis::preprocess::PreparedObservation;
use crate::analysis::types::{AnalysisResult, AnalysisVariant, TreatmentEffect, VarianceSource};
use crate::data::Treatment;

/// Stratify by treatment only and test treatment against the pooled residual
///
/// A treatment with no included observations yields a `NaN` mean which
/// propagates through the treatment and residual sums of squares; the
/// other treatments' estimates stay usable.
pub(crate) fn analyze(
    treatments: &[Treatment],
    observations: &[PreparedObservation],
) -> Result<AnalysisResult, AnalysisError> {
    let t = treatments.len();

    let mut grand = Moments::default();
    let mut by_treatment: Strata<usize> = Strata::new();
    for obs in observations {
        if !obs.contributes() {
            continue;
        }
        grand.push(obs.value);
        by_treatment.push(obs.treatment, obs.value);
    }

    // One mean per treatment; the residual needs at least one extra point.
    let n = grand.n;
    if n < t + 1 {
        return Err(AnalysisError::InsufficientData { n, required: t + 1 });
    }

    let grand_mean = grand.mean();
    let mut treatment_ss = 0.0;
    let mut residual_ss = 0.0;
    let mut effects = Vec::with_capacity(t);
    for (index, treatment) in treatments.iter().enumerate() {
        let cell = by_treatment.cell(&index);
        let mean = cell.mean();
        let deviation = mean - grand_mean;
        treatment_ss += cell.count() * deviation * deviation;
        residual_ss += cell.sum_sq - cell.count() * mean * mean;
        effects.push(TreatmentEffect {
            treatment: treatment.abbreviation().to_string(),
            estimate: mean,
            n: cell.n,
        });
    }
    let total_ss = grand.sum_sq - grand.count() * grand_mean * grand_mean;

    let treatment_df = t - 1;
    let total_df = n - 1;
    let residual_df = total_df - treatment_df;

    let residual = VarianceSource::untested(residual_ss, residual_df);
    let treatment =
        VarianceSource::tested(treatment_ss, treatment_df, residual.mean_sq, residual_df);

    Ok(AnalysisResult {
        variant: AnalysisVariant::Naive,
        n,
        effects,
        treatment,
        cycle: None,
        interaction: None,
        autoregression: None,
        residual,
        total_ss,
        total_df,
    })
}
