//! Shared error types for the services crate.

use thiserror::Error;

use fit_core::model::{PlanError, ReportError};

/// Errors emitted by the live session engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session already completed")]
    Completed,

    #[error("session is still in progress")]
    NotCompleted,

    #[error("set logging is only valid during the exercise phase")]
    NotExercising,

    #[error("set logged against exercise {got} but exercise {expected} is current")]
    WrongExercise { expected: usize, got: usize },

    #[error("a set must contain at least one rep")]
    EmptySet,

    #[error("no countdown is active")]
    NoCountdown,

    #[error("bootstrap cursor {index} is out of bounds for {len} exercises")]
    CursorOutOfBounds { index: usize, len: usize },

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Report(#[from] ReportError),
}
