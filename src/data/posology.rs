use serde::{Deserialize, Serialize};
use std::fmt;

/// Time of day at which a dose is administered
///
/// Every day of a [Posology] carries one [SlotDose] per slot.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Morning,
    Noon,
    Evening,
    Night,
}

impl Slot {
    /// All slots in administration order
    pub const ALL: [Slot; 4] = [Slot::Morning, Slot::Noon, Slot::Evening, Slot::Night];
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Morning => write!(f, "morning"),
            Slot::Noon => write!(f, "noon"),
            Slot::Evening => write!(f, "evening"),
            Slot::Night => write!(f, "night"),
        }
    }
}

/// A single dose at one time slot
///
/// The `fraction` is a unitless multiplier encoding split-pill dosing
/// (e.g. 0.5 for half a tablet). The administered quantity is
/// `amount * fraction`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct SlotDose {
    amount: f64,
    fraction: f64,
}

impl SlotDose {
    /// Create a new slot dose
    ///
    /// # Arguments
    ///
    /// * `amount` - Dose amount, expressed in the treatment's unit
    /// * `fraction` - Split-pill multiplier (1.0 = whole unit)
    pub fn new(amount: f64, fraction: f64) -> Self {
        SlotDose { amount, fraction }
    }

    /// Get the dose amount
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Get the split-pill fraction multiplier
    pub fn fraction(&self) -> f64 {
        self.fraction
    }
}

/// The four slot doses for one day of a dosing table
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct DayDose {
    morning: SlotDose,
    noon: SlotDose,
    evening: SlotDose,
    night: SlotDose,
}

impl DayDose {
    /// Create a day entry from its four slot doses
    pub fn new(morning: SlotDose, noon: SlotDose, evening: SlotDose, night: SlotDose) -> Self {
        DayDose {
            morning,
            noon,
            evening,
            night,
        }
    }

    /// Get the dose for a given time slot
    pub fn slot(&self, slot: Slot) -> SlotDose {
        match slot {
            Slot::Morning => self.morning,
            Slot::Noon => self.noon,
            Slot::Evening => self.evening,
            Slot::Night => self.night,
        }
    }
}

/// A dosing table for a single treatment, covering exactly one period
///
/// A [Posology] is an ordered list of [DayDose] entries, one per day of a
/// period. A treatment may own several alternative posologies; one of them
/// is selected at random when the trial is instantiated.
///
/// When `repeat_last` is set and the same treatment runs for directly
/// consecutive periods with this table, the continuation periods repeat the
/// table's final day on every day instead of restarting from day 1. This is
/// the maintenance-dose behavior of decreasing schedules.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Posology {
    days: Vec<DayDose>,
    repeat_last: bool,
}

impl Posology {
    /// Create a new posology from its per-day entries
    ///
    /// # Arguments
    ///
    /// * `days` - One [DayDose] per day of the period, in day order
    /// * `repeat_last` - Whether consecutive same-treatment periods repeat
    ///   the final day instead of restarting the table
    pub fn new(days: Vec<DayDose>, repeat_last: bool) -> Self {
        Posology { days, repeat_last }
    }

    /// Get the per-day dose entries
    pub fn days(&self) -> &[DayDose] {
        &self.days
    }

    /// Number of days covered by the table
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether the table has no days
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Whether the final day is repeated across same-treatment continuations
    pub fn repeat_last(&self) -> bool {
        self.repeat_last
    }
}
