//! Two-way ANOVA crossing treatment with randomization cycle
//!
//! A cycle is one complete balanced block of `|treatments|` periods in a
//! permutation-randomized sequence. Testing the treatment effect against
//! the treatment-by-cycle interaction instead of the pooled residual
//! isolates it from cycle-correlated noise (drift over the trial's course).

use crate::analysis::error::AnalysisError;
use crate::analysis::moments::{Moments, Strata};
use crate::analysis::preprocess::PreparedObservation;
use crate::analysis::types::{AnalysisResult, AnalysisVariant, TreatmentEffect, VarianceSource};
use crate::data::Treatment;
use crate::schedule::Schedule;

/// Verify cycle balance, stratify by treatment, cycle, and their cell
///
/// Every complete block of `|treatments|` periods must contain each
/// treatment exactly once, or the sequence was not produced by a
/// permutation-equivalent randomization and the analysis is rejected.
/// Observations in a trailing partial block carry no cycle index and are
/// excluded from the analysis.
pub(crate) fn analyze(
    treatments: &[Treatment],
    schedule: &Schedule,
    observations: &[PreparedObservation],
) -> Result<AnalysisResult, AnalysisError> {
    let t = treatments.len();
    let sequence = schedule.treatment_sequence();
    let cycles = sequence.len() / t;

    for block in sequence.chunks(t).take(cycles) {
        let balanced = treatments.iter().all(|treatment| {
            block
                .iter()
                .filter(|label| **label == treatment.abbreviation())
                .count()
                == 1
        });
        if !balanced {
            return Err(AnalysisError::IncompatibleRandomization);
        }
    }
    if cycles < 2 {
        return Err(AnalysisError::TooFewCycles(cycles));
    }

    let cycle_days = t * schedule.period_len();
    let origin = schedule.origin();

    let mut grand = Moments::default();
    let mut by_treatment: Strata<usize> = Strata::new();
    let mut by_cycle: Strata<usize> = Strata::new();
    let mut by_cell: Strata<(usize, usize)> = Strata::new();
    for obs in observations {
        if !obs.contributes() {
            continue;
        }
        let cycle = match obs.day.checked_sub(origin) {
            Some(offset) => offset / cycle_days,
            None => continue,
        };
        if cycle >= cycles {
            // Trailing partial cycle: excluded by policy.
            continue;
        }
        grand.push(obs.value);
        by_treatment.push(obs.treatment, obs.value);
        by_cycle.push(cycle, obs.value);
        by_cell.push((obs.treatment, cycle), obs.value);
    }

    // One free parameter per treatment-by-cycle cell.
    let n = grand.n;
    let required = t * cycles + 1;
    if n < required {
        return Err(AnalysisError::InsufficientData { n, required });
    }

    let grand_mean = grand.mean();
    let mut treatment_ss = 0.0;
    let mut effects = Vec::with_capacity(t);
    for (index, treatment) in treatments.iter().enumerate() {
        let cell = by_treatment.cell(&index);
        let deviation = cell.mean() - grand_mean;
        treatment_ss += cell.count() * deviation * deviation;
        effects.push(TreatmentEffect {
            treatment: treatment.abbreviation().to_string(),
            estimate: cell.mean(),
            n: cell.n,
        });
    }

    let mut cycle_ss = 0.0;
    for cycle in 0..cycles {
        let cell = by_cycle.cell(&cycle);
        let deviation = cell.mean() - grand_mean;
        cycle_ss += cell.count() * deviation * deviation;
    }

    // Standard two-way decomposition over the treatment-by-cycle cells.
    let mut interaction_ss = 0.0;
    let mut residual_ss = 0.0;
    for treatment in 0..t {
        for cycle in 0..cycles {
            let cell = by_cell.cell(&(treatment, cycle));
            let deviation = cell.mean() - by_treatment.cell(&treatment).mean()
                - by_cycle.cell(&cycle).mean()
                + grand_mean;
            interaction_ss += cell.count() * deviation * deviation;
            residual_ss += cell.sum_sq - cell.count() * cell.mean() * cell.mean();
        }
    }
    let total_ss = grand.sum_sq - grand.count() * grand_mean * grand_mean;

    let treatment_df = t - 1;
    let cycle_df = cycles - 1;
    let interaction_df = treatment_df * cycle_df;
    let total_df = n - 1;
    let residual_df = total_df - treatment_df - cycle_df - interaction_df;

    let residual = VarianceSource::untested(residual_ss, residual_df);
    let interaction = VarianceSource::tested(
        interaction_ss,
        interaction_df,
        residual.mean_sq,
        residual_df,
    );
    // Treatment is tested against the interaction, not the pooled residual.
    let treatment = VarianceSource::tested(
        treatment_ss,
        treatment_df,
        interaction.mean_sq,
        interaction_df,
    );
    let cycle = VarianceSource::tested(cycle_ss, cycle_df, residual.mean_sq, residual_df);

    Ok(AnalysisResult {
        variant: AnalysisVariant::Cycle,
        n,
        effects,
        treatment,
        cycle: Some(cycle),
        interaction: Some(interaction),
        autoregression: None,
        residual,
        total_ss,
        total_df,
    })
}
