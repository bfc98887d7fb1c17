//! Analysis result types

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

/// Which analysis-of-variance procedure to run
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisVariant {
    /// One-way ANOVA with treatment as the sole factor
    Naive,
    /// Two-way ANOVA crossing treatment with randomization cycle
    ///
    /// Requires the administration sequence to decompose into balanced
    /// cycles, i.e. a permutation (or equivalent custom) randomization.
    Cycle,
    /// ANCOVA with the lag-1 preceding observation as covariate
    Autoregression,
}

/// Effect estimate for one treatment
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TreatmentEffect {
    /// Treatment abbreviation
    pub treatment: String,
    /// Estimated effect on the analyzed variable
    ///
    /// `NaN` when the treatment has no included observations; callers must
    /// check before presenting the estimate as trustworthy.
    pub estimate: f64,
    /// Included observations contributing to the estimate
    pub n: usize,
}

/// One source in the variance decomposition
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VarianceSource {
    /// Sum of squares attributed to this source
    pub sum_sq: f64,
    /// Degrees of freedom
    pub df: usize,
    /// Mean square (`sum_sq / df`)
    pub mean_sq: f64,
    /// F statistic against this source's error term, if tested
    pub f_stat: Option<f64>,
    /// Upper-tail probability of the F distribution at `f_stat`
    pub p_value: Option<f64>,
}

impl VarianceSource {
    /// A source that carries no significance test (e.g. the residual)
    pub(crate) fn untested(sum_sq: f64, df: usize) -> Self {
        VarianceSource {
            sum_sq,
            df,
            mean_sq: sum_sq / df as f64,
            f_stat: None,
            p_value: None,
        }
    }

    /// A source tested against the given error mean square
    pub(crate) fn tested(sum_sq: f64, df: usize, error_ms: f64, error_df: usize) -> Self {
        let mean_sq = sum_sq / df as f64;
        let f_stat = mean_sq / error_ms;
        VarianceSource {
            sum_sq,
            df,
            mean_sq,
            f_stat: Some(f_stat),
            p_value: Some(f_upper_tail(f_stat, df, error_df)),
        }
    }
}

/// The outcome of one analysis query
///
/// Derived afresh from the plan and the outcome data on every call; never
/// persisted. Sources that do not apply to the requested variant are `None`.
///
/// Degenerate strata surface as `NaN` rather than an error so that the
/// remaining treatments' statistics stay usable; check [is_degenerate]
/// before trusting the numbers.
///
/// [is_degenerate]: AnalysisResult::is_degenerate
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// The procedure that produced this result
    pub variant: AnalysisVariant,
    /// Included, non-missing observations the analysis ran over
    pub n: usize,
    /// Per-treatment effect estimates, in trial treatment order
    pub effects: Vec<TreatmentEffect>,
    /// Treatment source, tested against the variant's error term
    pub treatment: VarianceSource,
    /// Cycle source (cycle variant only)
    pub cycle: Option<VarianceSource>,
    /// Treatment-by-cycle interaction (cycle variant only)
    pub interaction: Option<VarianceSource>,
    /// Lag-1 autoregression source (autoregression variant only)
    pub autoregression: Option<VarianceSource>,
    /// Residual source
    pub residual: VarianceSource,
    /// Total sum of squares about the grand mean
    pub total_ss: f64,
    /// Total degrees of freedom (`n - 1`)
    pub total_df: usize,
}

impl AnalysisResult {
    /// Whether any estimate or statistic degenerated to `NaN`
    ///
    /// A `NaN` comes from an empty stratum (e.g. a treatment with no
    /// included observations) and deliberately propagates instead of being
    /// zeroed out.
    pub fn is_degenerate(&self) -> bool {
        let source_nan = |s: &VarianceSource| {
            s.sum_sq.is_nan()
                || s.mean_sq.is_nan()
                || s.f_stat.is_some_and(|f| f.is_nan())
                || s.p_value.is_some_and(|p| p.is_nan())
        };
        self.effects.iter().any(|e| e.estimate.is_nan())
            || source_nan(&self.treatment)
            || self.cycle.as_ref().is_some_and(source_nan)
            || self.interaction.as_ref().is_some_and(source_nan)
            || self.autoregression.as_ref().is_some_and(source_nan)
            || source_nan(&self.residual)
            || self.total_ss.is_nan()
    }
}

/// Upper-tail probability of the F distribution
///
/// Returns `NaN` for a non-finite statistic or non-positive degrees of
/// freedom, keeping degeneracy visible instead of raising.
pub(crate) fn f_upper_tail(f_stat: f64, df1: usize, df2: usize) -> f64 {
    if !f_stat.is_finite() || f_stat < 0.0 {
        return f64::NAN;
    }
    match FisherSnedecor::new(df1 as f64, df2 as f64) {
        Ok(dist) => 1.0 - dist.cdf(f_stat),
        Err(_) => f64::NAN,
    }
}
