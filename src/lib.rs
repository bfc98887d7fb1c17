pub mod analysis;
pub mod data;
pub mod error;
pub mod randomize;
pub mod schedule;

pub use crate::analysis::summary::{summarize, TreatmentSummary};
pub use crate::analysis::{
    analyze, AnalysisError, AnalysisResult, AnalysisVariant, TreatmentEffect, VarianceSource,
};
pub use crate::data::*;
pub use crate::randomize::{RandomizeError, Strategy};
pub use crate::schedule::{
    assemble, decreasing_blocks, DecreasingBlock, Schedule, ScheduleEntry, ScheduleError,
    SelectedPosology,
};
pub use error::Nof1Error;
pub use std::collections::HashMap;
