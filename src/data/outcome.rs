use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Patient-reported data for one trial day
///
/// Each data point records the day it was collected on, the treatment in
/// effect that day, and the raw answers to the monitored variables as
/// free-form strings. Values are interpreted numerically at analysis time;
/// an empty or non-numeric value counts as missing.
///
/// Data points accrue during the trial's active phase and may be edited up
/// to the reporting deadline; the analysis engine treats them as read-only.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OutcomeDataPoint {
    day: usize,
    treatment: String,
    values: HashMap<String, String>,
}

impl OutcomeDataPoint {
    /// Create a data point with no recorded values
    ///
    /// # Arguments
    ///
    /// * `day` - Global day index, matching the administration plan
    /// * `treatment` - Abbreviation of the treatment in effect that day
    pub fn new(day: usize, treatment: impl Into<String>) -> Self {
        OutcomeDataPoint {
            day,
            treatment: treatment.into(),
            values: HashMap::new(),
        }
    }

    /// Record a value for a monitored variable
    pub fn with_value(mut self, variable: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(variable.into(), value.into());
        self
    }

    /// Get the day index
    pub fn day(&self) -> usize {
        self.day
    }

    /// Get the abbreviation of the treatment in effect
    pub fn treatment(&self) -> &str {
        &self.treatment
    }

    /// Get the raw value recorded for a variable, if any
    pub fn value(&self, variable: &str) -> Option<&str> {
        self.values.get(variable).map(|v| v.as_str())
    }

    /// Interpret a variable's value as a number
    ///
    /// Returns `NaN` when the variable was not recorded, was left empty, or
    /// does not parse as a number. `NaN` marks the observation as missing
    /// for every analysis variant.
    pub fn numeric_value(&self, variable: &str) -> f64 {
        match self.value(variable) {
            Some(raw) if !raw.trim().is_empty() => raw.trim().parse().unwrap_or(f64::NAN),
            _ => f64::NAN,
        }
    }
}

/// A monitored variable selected for analysis
///
/// `skipped_run_in_days` discards the first N days of every period as
/// washout: observations falling inside the run-in window of a period do
/// not contribute to any analysis.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnalysisVariable {
    pub name: String,
    pub skipped_run_in_days: usize,
}

impl AnalysisVariable {
    /// Create an analysis variable
    pub fn new(name: impl Into<String>, skipped_run_in_days: usize) -> Self {
        AnalysisVariable {
            name: name.into(),
            skipped_run_in_days,
        }
    }
}
