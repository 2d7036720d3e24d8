use fit_core::model::{
    Exercise, ExerciseGoal, SessionId, SessionKind, SessionMode, SessionPhase, SessionTotals,
};

/// Read-only view of a live session.
///
/// This is intentionally **not** a UI view-model:
/// - no pre-formatted strings
/// - no localization assumptions
///
/// Observers render it however they like; only the controller mutates the
/// underlying state.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub kind: SessionKind,
    pub mode: SessionMode,
    pub phase: SessionPhase,
    pub paused: bool,
    pub current_index: usize,
    pub exercise_count: usize,
    /// `None` once the cursor has passed the final exercise.
    pub current_exercise: Option<ExerciseSnapshot>,
    /// Seconds left on the phase countdown; 0 while no countdown runs.
    pub phase_remaining_secs: u32,
    pub elapsed_secs: u32,
    pub totals: SessionTotals,
}

impl SessionSnapshot {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase.is_terminal()
    }
}

/// Current-exercise details within a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseSnapshot {
    pub index: usize,
    pub name: String,
    pub completed_sets: u32,
    pub target_sets: u32,
    /// Present for strength work.
    pub target_reps: Option<u32>,
    /// Present for timed holds.
    pub hold_secs: Option<u32>,
}

impl ExerciseSnapshot {
    #[must_use]
    pub fn from_exercise(exercise: &Exercise) -> Self {
        let (target_reps, hold_secs) = match exercise.goal() {
            ExerciseGoal::Sets { target_reps, .. } => (Some(target_reps), None),
            ExerciseGoal::Timed { duration_secs } => (None, Some(duration_secs)),
        };
        Self {
            index: exercise.index(),
            name: exercise.name().to_owned(),
            completed_sets: exercise.completed_sets(),
            target_sets: exercise.target_sets(),
            target_reps,
            hold_secs,
        }
    }
}
