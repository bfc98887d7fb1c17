use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::randomize::RandomizeError;
use crate::schedule::ScheduleError;

#[derive(Error, Debug)]
pub enum Nof1Error {
    #[error(transparent)]
    Randomize(#[from] RandomizeError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}
