//! ANCOVA with the lag-1 preceding observation as covariate
//!
//! Each observation is modeled as a linear function of the observation
//! immediately before it in day order, fit with a common (pooled) slope
//! across treatments. Regressing out the autocorrelation between adjacent
//! days leaves a cleaner treatment contrast than the naive one-way model.

use crate::analysis::error::AnalysisError;
use crate::analysis::preprocess::PreparedObservation;
use crate::analysis::types::{AnalysisResult, AnalysisVariant, TreatmentEffect, VarianceSource};
use crate::data::Treatment;

/// Bivariate regression accumulators for one stratum
#[derive(Debug, Clone, Copy, Default)]
struct Regression {
    n: usize,
    sx: f64,
    sxx: f64,
    sy: f64,
    syy: f64,
    sxy: f64,
}

impl Regression {
    fn push(&mut self, x: f64, y: f64) {
        self.n += 1;
        self.sx += x;
        self.sxx += x * x;
        self.sy += y;
        self.syy += y * y;
        self.sxy += x * y;
    }

    fn count(&self) -> f64 {
        self.n as f64
    }

    fn x_mean(&self) -> f64 {
        self.sx / self.count()
    }

    fn y_mean(&self) -> f64 {
        self.sy / self.count()
    }

    /// Centered sum of squares of the predictor
    fn sxx_centered(&self) -> f64 {
        self.sxx - self.sx * self.sx / self.count()
    }

    /// Centered sum of squares of the response
    fn syy_centered(&self) -> f64 {
        self.syy - self.sy * self.sy / self.count()
    }

    /// Centered cross product
    fn sxy_centered(&self) -> f64 {
        self.sxy - self.sx * self.sy / self.count()
    }
}

/// Fit the lag-1 model and decompose the variance
///
/// Only pairs of directly consecutive included, non-missing observations
/// contribute: an excluded or missing point breaks the chain, so its
/// successor has no predecessor. The pooled slope `Σ Sxy_t / Σ Sxx_t` is
/// identically the SSx-weighted average of the per-treatment slopes.
/// Treatment SS is derived by subtraction so that autoregression, treatment,
/// and residual sum exactly to the total.
pub(crate) fn analyze(
    treatments: &[Treatment],
    observations: &[PreparedObservation],
) -> Result<AnalysisResult, AnalysisError> {
    let t = treatments.len();

    let mut global = Regression::default();
    let mut by_treatment = vec![Regression::default(); t];
    let mut predecessor: Option<f64> = None;
    for obs in observations {
        if obs.contributes() {
            if let Some(x) = predecessor {
                global.push(x, obs.value);
                by_treatment[obs.treatment].push(x, obs.value);
            }
            predecessor = Some(obs.value);
        } else {
            predecessor = None;
        }
    }

    // One mean per treatment plus the slope, plus one residual point.
    let n = global.n;
    if n < t + 2 {
        return Err(AnalysisError::InsufficientData { n, required: t + 2 });
    }

    // Pooled within-treatment sums; an empty treatment stratum contributes
    // NaN, which propagates visibly instead of being dropped.
    let mut sxx_within = 0.0;
    let mut syy_within = 0.0;
    let mut sxy_within = 0.0;
    for regression in &by_treatment {
        sxx_within += regression.sxx_centered();
        syy_within += regression.syy_centered();
        sxy_within += regression.sxy_centered();
    }
    let slope = sxy_within / sxx_within;

    let total_ss = global.syy_centered();
    let autoregression_ss = global.sxy_centered() * global.sxy_centered() / global.sxx_centered();
    let residual_ss = syy_within - sxy_within * sxy_within / sxx_within;
    let treatment_ss = total_ss - autoregression_ss - residual_ss;

    let treatment_df = t - 1;
    let total_df = n - 1;
    let residual_df = total_df - treatment_df - 1;

    let x_mean = global.x_mean();
    let mut effects = Vec::with_capacity(t);
    for (index, treatment) in treatments.iter().enumerate() {
        let stratum = &by_treatment[index];
        // Covariate-adjusted treatment mean under the pooled slope.
        let estimate = stratum.y_mean() - slope * (stratum.x_mean() - x_mean);
        effects.push(TreatmentEffect {
            treatment: treatment.abbreviation().to_string(),
            estimate,
            n: stratum.n,
        });
    }

    let residual = VarianceSource::untested(residual_ss, residual_df);
    let autoregression =
        VarianceSource::tested(autoregression_ss, 1, residual.mean_sq, residual_df);
    let treatment =
        VarianceSource::tested(treatment_ss, treatment_df, residual.mean_sq, residual_df);

    Ok(AnalysisResult {
        variant: AnalysisVariant::Autoregression,
        n,
        effects,
        treatment,
        cycle: None,
        interaction: None,
        autoregression: Some(autoregression),
        residual,
        total_ss,
        total_df,
    })
}
