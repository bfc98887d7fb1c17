//! Trial data model
//!
//! The types in this module describe a trial's frozen configuration
//! ([Treatment], [Posology], [TrialDesign]) and the patient-reported data
//! collected while it runs ([OutcomeDataPoint]). Configuration is authored
//! before randomization and immutable afterwards; outcome data accrues
//! incrementally during the active phase.

pub mod outcome;
pub mod posology;
pub mod treatment;
pub mod trial;

pub use outcome::{AnalysisVariable, OutcomeDataPoint};
pub use posology::{DayDose, Posology, Slot, SlotDose};
pub use treatment::Treatment;
pub use trial::{GeneratedTrial, TrialDesign, TrialDesignBuilder};
