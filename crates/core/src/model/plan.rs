use thiserror::Error;

use crate::model::exercise::{Exercise, ExerciseError};

//
// ─── SESSION KIND ──────────────────────────────────────────────────────────────
//

/// Which flavor of session a plan drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    /// Free-form strength work: open-ended set logging per exercise.
    FreeForm,
    /// Fixed corrective/rehab sequence: countdown-driven holds.
    Corrective,
}

impl SessionKind {
    /// Rest applied between exercises when the exercise has no override.
    #[must_use]
    pub fn default_rest_secs(self) -> u32 {
        match self {
            Self::FreeForm => 60,
            Self::Corrective => 15,
        }
    }
}

//
// ─── PLAN ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlanError {
    #[error("a workout plan needs at least one exercise")]
    Empty,

    #[error("exercise at position {expected} carries index {found}")]
    IndexMismatch { expected: usize, found: usize },

    #[error(transparent)]
    Exercise(#[from] ExerciseError),
}

/// Ordered exercise sequence a session runs through.
///
/// Fixed at session start: exercises are never added, removed or reordered,
/// only mutated in place as sets complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutPlan {
    kind: SessionKind,
    exercises: Vec<Exercise>,
}

impl WorkoutPlan {
    /// Creates a plan, checking that exercise indices match their positions.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::Empty` for an empty list and
    /// `PlanError::IndexMismatch` when an exercise's stable index disagrees
    /// with its position.
    pub fn new(kind: SessionKind, exercises: Vec<Exercise>) -> Result<Self, PlanError> {
        if exercises.is_empty() {
            return Err(PlanError::Empty);
        }
        for (position, exercise) in exercises.iter().enumerate() {
            if exercise.index() != position {
                return Err(PlanError::IndexMismatch {
                    expected: position,
                    found: exercise.index(),
                });
            }
        }

        Ok(Self { kind, exercises })
    }

    #[must_use]
    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    #[must_use]
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Rest to apply after the given exercise under this plan's defaults.
    #[must_use]
    pub fn rest_secs_for(&self, exercise: &Exercise) -> u32 {
        exercise.rest_secs_or(self.kind.default_rest_secs())
    }

    /// Decomposes the plan for the session engine to own.
    #[must_use]
    pub fn into_parts(self) -> (SessionKind, Vec<Exercise>) {
        (self.kind, self.exercises)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
