//! Schedule assembly: from randomized sequence to day-by-day plan
//!
//! Given the administration sequence and one selected dosing table per
//! treatment, [assemble] materializes the full [Schedule] the patient
//! follows, one entry per calendar day. The plan length is always exactly
//! `periods * period_len`. [decreasing_blocks] derives the supplementary
//! taper blocks handed to the dispensing pharmacy.
//!
//! ```
//! use nof1::*;
//!
//! let day = DayDose::new(
//!     SlotDose::new(10.0, 1.0),
//!     SlotDose::default(),
//!     SlotDose::default(),
//!     SlotDose::default(),
//! );
//! let mut selections = HashMap::new();
//! selections.insert(
//!     "VER".to_string(),
//!     SelectedPosology::new("mg", Posology::new(vec![day; 3], false)),
//! );
//! selections.insert(
//!     "PLA".to_string(),
//!     SelectedPosology::new("mg", Posology::new(vec![day; 3], false)),
//! );
//!
//! let sequence = vec!["VER".to_string(), "PLA".to_string()];
//! let plan = assemble(&sequence, &selections, 3, 1).unwrap();
//! assert_eq!(plan.len(), 6);
//! assert_eq!(plan.entries()[0].day, 1);
//! ```

mod assemble;
mod error;
mod types;

#[cfg(test)]
mod tests;

pub use assemble::{assemble, decreasing_blocks};
pub use error::ScheduleError;
pub use types::{DecreasingBlock, Schedule, ScheduleEntry, SelectedPosology};
