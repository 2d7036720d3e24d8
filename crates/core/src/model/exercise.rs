use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExerciseError {
    #[error("exercise name cannot be empty")]
    EmptyName,

    #[error("target sets must be > 0")]
    ZeroTargetSets,

    #[error("target reps must be > 0")]
    ZeroTargetReps,

    #[error("hold duration must be > 0")]
    ZeroDuration,

    #[error("completed sets ({completed}) exceed target ({target})")]
    TooManySets { completed: u32, target: u32 },
}

//
// ─── GOAL ──────────────────────────────────────────────────────────────────────
//

/// What finishing an exercise means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseGoal {
    /// Free-form strength work: log `target_sets` sets of `target_reps` reps.
    Sets { target_sets: u32, target_reps: u32 },
    /// Timer-bound hold (corrective/rehab work) lasting `duration_secs`.
    Timed { duration_secs: u32 },
}

impl ExerciseGoal {
    fn validate(self) -> Result<(), ExerciseError> {
        match self {
            Self::Sets {
                target_sets,
                target_reps,
            } => {
                if target_sets == 0 {
                    return Err(ExerciseError::ZeroTargetSets);
                }
                if target_reps == 0 {
                    return Err(ExerciseError::ZeroTargetReps);
                }
                Ok(())
            }
            Self::Timed { duration_secs } => {
                if duration_secs == 0 {
                    return Err(ExerciseError::ZeroDuration);
                }
                Ok(())
            }
        }
    }

    /// Number of sets the goal requires; a timed hold counts as a single set.
    #[must_use]
    pub fn target_sets(self) -> u32 {
        match self {
            Self::Sets { target_sets, .. } => target_sets,
            Self::Timed { .. } => 1,
        }
    }

    /// Returns true when the exercise phase is driven by a countdown.
    #[must_use]
    pub fn is_timed(self) -> bool {
        matches!(self, Self::Timed { .. })
    }
}

//
// ─── EXERCISE ──────────────────────────────────────────────────────────────────
//

/// One entry of a workout plan, identified by its position.
///
/// The exercise list is fixed at session start and never reordered; entries
/// are only mutated in place as sets complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    index: usize,
    name: String,
    goal: ExerciseGoal,
    completed_sets: u32,
    rest_secs: Option<u32>,
}

impl Exercise {
    /// Creates a fresh exercise with no completed sets.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseError` when the name is empty or the goal is degenerate.
    pub fn new(
        index: usize,
        name: impl Into<String>,
        goal: ExerciseGoal,
        rest_secs: Option<u32>,
    ) -> Result<Self, ExerciseError> {
        Self::from_persisted(index, name, goal, 0, rest_secs)
    }

    /// Rehydrates an exercise with prior progress, e.g. when a session is
    /// resumed from a backend bootstrap.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseError::TooManySets` when the persisted count exceeds
    /// the target, plus the usual construction errors.
    pub fn from_persisted(
        index: usize,
        name: impl Into<String>,
        goal: ExerciseGoal,
        completed_sets: u32,
        rest_secs: Option<u32>,
    ) -> Result<Self, ExerciseError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ExerciseError::EmptyName);
        }
        goal.validate()?;
        let target = goal.target_sets();
        if completed_sets > target {
            return Err(ExerciseError::TooManySets {
                completed: completed_sets,
                target,
            });
        }

        Ok(Self {
            index,
            name,
            goal,
            completed_sets,
            rest_secs,
        })
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn goal(&self) -> ExerciseGoal {
        self.goal
    }

    #[must_use]
    pub fn completed_sets(&self) -> u32 {
        self.completed_sets
    }

    /// Per-exercise rest override, if any.
    #[must_use]
    pub fn rest_secs(&self) -> Option<u32> {
        self.rest_secs
    }

    /// Rest to apply after this exercise, falling back to the session default.
    #[must_use]
    pub fn rest_secs_or(&self, default: u32) -> u32 {
        self.rest_secs.unwrap_or(default)
    }

    #[must_use]
    pub fn target_sets(&self) -> u32 {
        self.goal.target_sets()
    }

    #[must_use]
    pub fn remaining_sets(&self) -> u32 {
        self.target_sets().saturating_sub(self.completed_sets)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_sets >= self.target_sets()
    }

    /// Records one completed set.
    ///
    /// The count saturates at the target and is never decremented. Returns
    /// true when the exercise is complete after the increment.
    pub fn log_set(&mut self) -> bool {
        if self.completed_sets < self.target_sets() {
            self.completed_sets += 1;
        }
        self.is_complete()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn strength(index: usize) -> Exercise {
        Exercise::new(
            index,
            "Goblet Squat",
            ExerciseGoal::Sets {
                target_sets: 3,
                target_reps: 10,
            },
            None,
        )
        .unwrap()
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = Exercise::new(
            0,
            "  ",
            ExerciseGoal::Timed { duration_secs: 30 },
            None,
        )
        .unwrap_err();
        assert_eq!(err, ExerciseError::EmptyName);
    }

    #[test]
    fn degenerate_goals_are_rejected() {
        let err = Exercise::new(
            0,
            "Row",
            ExerciseGoal::Sets {
                target_sets: 0,
                target_reps: 10,
            },
            None,
        )
        .unwrap_err();
        assert_eq!(err, ExerciseError::ZeroTargetSets);

        let err = Exercise::new(0, "Hold", ExerciseGoal::Timed { duration_secs: 0 }, None)
            .unwrap_err();
        assert_eq!(err, ExerciseError::ZeroDuration);
    }

    #[test]
    fn log_set_saturates_at_target() {
        let mut exercise = strength(0);
        assert!(!exercise.log_set());
        assert!(!exercise.log_set());
        assert!(exercise.log_set());
        // Extra logs never push past the target.
        assert!(exercise.log_set());
        assert_eq!(exercise.completed_sets(), 3);
        assert_eq!(exercise.remaining_sets(), 0);
    }

    #[test]
    fn timed_hold_counts_as_one_set() {
        let mut exercise =
            Exercise::new(0, "Chin Tuck", ExerciseGoal::Timed { duration_secs: 30 }, None)
                .unwrap();
        assert_eq!(exercise.target_sets(), 1);
        assert!(exercise.log_set());
        assert!(exercise.is_complete());
    }

    #[test]
    fn persisted_progress_is_capped() {
        let err = Exercise::from_persisted(
            0,
            "Push-up",
            ExerciseGoal::Sets {
                target_sets: 2,
                target_reps: 12,
            },
            3,
            None,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ExerciseError::TooManySets {
                completed: 3,
                target: 2
            }
        );
    }

    #[test]
    fn rest_falls_back_to_session_default() {
        let with_override = Exercise::new(
            0,
            "Plank",
            ExerciseGoal::Timed { duration_secs: 45 },
            Some(20),
        )
        .unwrap();
        assert_eq!(with_override.rest_secs_or(60), 20);
        assert_eq!(strength(0).rest_secs_or(60), 60);
    }
}
