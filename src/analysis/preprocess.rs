//! Shared outcome-stream preprocessing
//!
//! Every variant consumes the same prepared view of the outcome data: the
//! treatment resolved to its index in the trial's treatment list, the
//! variable parsed to a number (`NaN` when missing), and the run-in
//! exclusion flag computed from the plan's period geometry.

use crate::analysis::error::AnalysisError;
use crate::data::{AnalysisVariable, OutcomeDataPoint, Treatment};
use crate::schedule::Schedule;

/// One outcome point, resolved and flagged for analysis
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PreparedObservation {
    /// Global day index
    pub day: usize,
    /// Index of the day's treatment in the trial's treatment list
    pub treatment: usize,
    /// Parsed value of the analyzed variable; `NaN` when missing
    pub value: f64,
    /// Whether the day falls outside its period's run-in window
    ///
    /// A missing value is excluded regardless of this flag.
    pub include: bool,
}

impl PreparedObservation {
    /// Included and non-missing: contributes to accumulators
    pub fn contributes(&self) -> bool {
        self.include && !self.value.is_nan()
    }
}

/// Resolve, parse, and flag the outcome points, sorted by day
pub(crate) fn collect(
    treatments: &[Treatment],
    schedule: &Schedule,
    outcomes: &[OutcomeDataPoint],
    variable: &AnalysisVariable,
) -> Result<Vec<PreparedObservation>, AnalysisError> {
    let period_len = schedule.period_len();
    let origin = schedule.origin();

    let mut prepared = Vec::with_capacity(outcomes.len());
    for point in outcomes {
        let treatment = treatments
            .iter()
            .position(|t| t.abbreviation() == point.treatment())
            .ok_or_else(|| AnalysisError::UnknownTreatment(point.treatment().to_string()))?;

        // A day before the plan's origin cannot be attributed to a period.
        let include = match point.day().checked_sub(origin) {
            Some(offset) => offset % period_len >= variable.skipped_run_in_days,
            None => false,
        };

        prepared.push(PreparedObservation {
            day: point.day(),
            treatment,
            value: point.numeric_value(&variable.name),
            include,
        });
    }
    prepared.sort_by_key(|o| o.day);
    Ok(prepared)
}
