use serde::{Deserialize, Serialize};

use crate::data::posology::{DayDose, Posology};
use crate::schedule::error::ScheduleError;

/// The dosing table chosen for one treatment at trial instantiation
///
/// Pairs the randomly selected [Posology] with the treatment's unit, which
/// the assembled plan repeats on every day entry for the exporter's benefit.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SelectedPosology {
    unit: String,
    posology: Posology,
}

impl SelectedPosology {
    /// Create a selection from the treatment's unit and the chosen table
    pub fn new(unit: impl Into<String>, posology: Posology) -> Self {
        SelectedPosology {
            unit: unit.into(),
            posology,
        }
    }

    /// Get the dose unit
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Get the chosen dosing table
    pub fn posology(&self) -> &Posology {
        &self.posology
    }
}

/// One day of the administration plan
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    /// Global day index, contiguous from the plan's origin
    pub day: usize,
    /// Abbreviation of the treatment administered this day
    pub treatment: String,
    /// Unit the doses are expressed in
    pub unit: String,
    /// The four slot doses for this day
    pub doses: DayDose,
}

/// The materialized day-by-day administration plan
///
/// Always exactly `periods * period_len` entries with contiguous day
/// indices starting at `origin`. Each block of `period_len` consecutive
/// entries carries one period's treatment. The plan retains its period
/// geometry so the analysis engine can recover period and cycle boundaries.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "RawSchedule")]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
    origin: usize,
    period_len: usize,
}

/// Unvalidated mirror of [Schedule], checked on deserialization
#[derive(Deserialize)]
struct RawSchedule {
    entries: Vec<ScheduleEntry>,
    origin: usize,
    period_len: usize,
}

impl TryFrom<RawSchedule> for Schedule {
    type Error = ScheduleError;

    fn try_from(raw: RawSchedule) -> Result<Self, Self::Error> {
        if raw.period_len == 0 {
            return Err(ScheduleError::InvalidPeriodLength(0));
        }
        if raw.entries.len() % raw.period_len != 0 {
            return Err(ScheduleError::TruncatedPlan {
                len: raw.entries.len(),
                period_len: raw.period_len,
            });
        }
        Ok(Schedule {
            entries: raw.entries,
            origin: raw.origin,
            period_len: raw.period_len,
        })
    }
}

impl Schedule {
    pub(crate) fn new(entries: Vec<ScheduleEntry>, origin: usize, period_len: usize) -> Self {
        Schedule {
            entries,
            origin,
            period_len,
        }
    }

    /// Get the day entries in day order
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Total number of days in the plan
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the plan has no days
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First day index of the plan
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// Days per period
    pub fn period_len(&self) -> usize {
        self.period_len
    }

    /// Number of periods in the plan
    pub fn periods(&self) -> usize {
        self.entries.len() / self.period_len
    }

    /// The treatment administered in each period, in period order
    pub fn treatment_sequence(&self) -> Vec<&str> {
        self.entries
            .chunks(self.period_len)
            .map(|period| period[0].treatment.as_str())
            .collect()
    }
}

/// A supplementary taper block for the dispensing pharmacy
///
/// Emitted at a period boundary where the treatment changes away from one
/// that declares a decreasing dosage table. Informational only; not part of
/// the primary plan.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DecreasingBlock {
    /// Global day index of the first taper day
    pub start_day: usize,
    /// Abbreviation of the treatment being tapered off
    pub treatment: String,
    /// Unit the doses are expressed in
    pub unit: String,
    /// The taper table's per-day doses
    pub doses: Vec<DayDose>,
}
