//! Schedule assembly error types

use thiserror::Error;

/// Errors that can occur while assembling the administration plan
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A period's treatment has no selected dosing table
    #[error("No dosing table selected for treatment '{0}'")]
    MissingPosology(String),

    /// The period length must cover at least one day
    #[error("Period length must be at least 1 day, got {0}")]
    InvalidPeriodLength(usize),

    /// A dosing table must cover exactly one period
    #[error("Dosing table for '{treatment}' covers {days} days, expected {expected}")]
    PosologyLengthMismatch {
        treatment: String,
        days: usize,
        expected: usize,
    },

    /// A persisted plan must divide evenly into periods
    #[error("Plan of {len} days is not a multiple of the period length {period_len}")]
    TruncatedPlan { len: usize, period_len: usize },
}
