use fit_core::model::Exercise;

use crate::error::SessionError;

//
// ─── RESULTS ───────────────────────────────────────────────────────────────────
//

/// Outcome of logging one set against the current exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetOutcome {
    /// True when the logged set was the last one the exercise needed.
    pub exercise_complete: bool,
}

/// Result of advancing the cursor past a finished exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The cursor moved to the exercise at this index.
    Next(usize),
    /// There was no next exercise; the session is done.
    SessionComplete,
}

//
// ─── SEQUENCER ─────────────────────────────────────────────────────────────────
//

/// Ordered exercise sequence with a monotone cursor.
///
/// The cursor only ever moves forward and never passes `len()`; it equals
/// `len()` exactly when the session has run out of exercises.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseSequencer {
    exercises: Vec<Exercise>,
    current: usize,
}

impl ExerciseSequencer {
    #[must_use]
    pub fn new(exercises: Vec<Exercise>) -> Self {
        Self {
            exercises,
            current: 0,
        }
    }

    /// Rebuild a sequencer with a restored cursor, e.g. from a backend
    /// bootstrap.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::CursorOutOfBounds` when the cursor is past the
    /// end of the list (`current == len` is valid and means exhausted).
    pub fn resume(exercises: Vec<Exercise>, current: usize) -> Result<Self, SessionError> {
        if current > exercises.len() {
            return Err(SessionError::CursorOutOfBounds {
                index: current,
                len: exercises.len(),
            });
        }
        Ok(Self { exercises, current })
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    #[must_use]
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    /// The exercise under the cursor, or `None` once exhausted.
    #[must_use]
    pub fn current_exercise(&self) -> Option<&Exercise> {
        self.exercises.get(self.current)
    }

    pub(crate) fn current_exercise_mut(&mut self) -> Option<&mut Exercise> {
        self.exercises.get_mut(self.current)
    }

    /// True when the cursor sits on the final exercise.
    #[must_use]
    pub fn is_on_last(&self) -> bool {
        self.current + 1 == self.exercises.len()
    }

    /// True once the cursor has moved past every exercise.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.current >= self.exercises.len()
    }

    /// Number of exercises that have reached their target.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.exercises.iter().filter(|e| e.is_complete()).count()
    }

    /// Record one set against the exercise at `exercise_index`.
    ///
    /// The UI only ever offers the current exercise, but the sequencer
    /// guards the contract anyway.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` once the cursor is exhausted and
    /// `SessionError::WrongExercise` when the index is not the current one.
    pub fn log_set(&mut self, exercise_index: usize) -> Result<SetOutcome, SessionError> {
        if self.is_exhausted() {
            return Err(SessionError::Completed);
        }
        if exercise_index != self.current {
            return Err(SessionError::WrongExercise {
                expected: self.current,
                got: exercise_index,
            });
        }

        let exercise = self
            .exercises
            .get_mut(self.current)
            .ok_or(SessionError::Completed)?;
        let exercise_complete = exercise.log_set();
        Ok(SetOutcome { exercise_complete })
    }

    /// Move the cursor forward.
    ///
    /// Past the final exercise the cursor parks at `len()` and every further
    /// call keeps reporting `SessionComplete`.
    pub fn advance(&mut self) -> Advance {
        if self.current + 1 < self.exercises.len() {
            self.current += 1;
            Advance::Next(self.current)
        } else {
            self.current = self.exercises.len();
            Advance::SessionComplete
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use fit_core::model::ExerciseGoal;

    fn strength_list(count: usize, target_sets: u32) -> Vec<Exercise> {
        (0..count)
            .map(|index| {
                Exercise::new(
                    index,
                    format!("Exercise {index}"),
                    ExerciseGoal::Sets {
                        target_sets,
                        target_reps: 10,
                    },
                    None,
                )
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn logging_against_wrong_index_is_rejected() {
        let mut sequencer = ExerciseSequencer::new(strength_list(3, 2));
        let err = sequencer.log_set(1).unwrap_err();
        assert!(matches!(
            err,
            SessionError::WrongExercise {
                expected: 0,
                got: 1
            }
        ));
        // The guard leaves state untouched.
        assert_eq!(sequencer.exercises()[1].completed_sets(), 0);
    }

    #[test]
    fn target_sets_completes_the_exercise() {
        let mut sequencer = ExerciseSequencer::new(strength_list(2, 2));
        assert!(!sequencer.log_set(0).unwrap().exercise_complete);
        assert!(sequencer.log_set(0).unwrap().exercise_complete);
        assert_eq!(sequencer.exercises()[0].completed_sets(), 2);
    }

    #[test]
    fn cursor_is_monotone_and_bounded() {
        let mut sequencer = ExerciseSequencer::new(strength_list(2, 1));
        assert_eq!(sequencer.advance(), Advance::Next(1));
        assert!(sequencer.is_on_last());
        assert_eq!(sequencer.advance(), Advance::SessionComplete);
        assert_eq!(sequencer.current_index(), 2);
        // Further advances keep the cursor parked at len().
        assert_eq!(sequencer.advance(), Advance::SessionComplete);
        assert_eq!(sequencer.current_index(), 2);
    }

    #[test]
    fn exhausted_sequencer_rejects_sets() {
        let mut sequencer = ExerciseSequencer::new(strength_list(1, 1));
        assert_eq!(sequencer.advance(), Advance::SessionComplete);
        assert!(matches!(
            sequencer.log_set(0).unwrap_err(),
            SessionError::Completed
        ));
    }

    #[test]
    fn resume_validates_the_cursor() {
        let exercises = strength_list(2, 1);
        assert!(ExerciseSequencer::resume(exercises.clone(), 2).is_ok());
        let err = ExerciseSequencer::resume(exercises, 3).unwrap_err();
        assert!(matches!(
            err,
            SessionError::CursorOutOfBounds { index: 3, len: 2 }
        ));
    }
}
