use thiserror::Error;

use crate::model::{ExerciseError, PlanError, ReportError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Exercise(#[from] ExerciseError),
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error(transparent)]
    Report(#[from] ReportError),
}
