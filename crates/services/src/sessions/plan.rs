//! Guest fallback plans and backend bootstrap conversion.

use backend::SessionBootstrap;
use fit_core::model::{
    Exercise, ExerciseGoal, PlanError, SessionKind, SessionTotals, WorkoutPlan,
};

use crate::error::SessionError;

/// Mid-session progress restored from a backend bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResumePoint {
    pub current_index: usize,
    pub totals: SessionTotals,
}

/// Built-in plan used when the backend is unreachable or the user is a guest.
///
/// # Panics
///
/// Never panics in practice; the built-in entries always pass validation.
#[must_use]
pub fn demo_plan(kind: SessionKind) -> WorkoutPlan {
    let exercises = match kind {
        SessionKind::FreeForm => vec![
            strength(0, "Goblet Squat", 3, 10),
            strength(1, "Push-up", 3, 12),
            strength(2, "Bent-over Row", 3, 10),
        ],
        SessionKind::Corrective => vec![
            hold(0, "Chin Tuck", 30),
            hold(1, "Shoulder Blade Squeeze", 30),
            hold(2, "Doorway Pec Stretch", 45),
        ],
    };
    WorkoutPlan::new(kind, exercises).expect("built-in plan should be valid")
}

/// Convert a backend bootstrap into a domain plan plus restored progress.
///
/// # Errors
///
/// Returns `SessionError::Plan` when a record fails domain validation and
/// `SessionError::CursorOutOfBounds` when the restored cursor does not fit.
pub fn bootstrap_plan(
    kind: SessionKind,
    bootstrap: SessionBootstrap,
) -> Result<(WorkoutPlan, ResumePoint), SessionError> {
    let mut exercises = Vec::with_capacity(bootstrap.exercises.len());
    for record in bootstrap.exercises {
        exercises.push(record.into_exercise().map_err(PlanError::Exercise)?);
    }
    let plan = WorkoutPlan::new(kind, exercises)?;

    if bootstrap.current_exercise_index > plan.len() {
        return Err(SessionError::CursorOutOfBounds {
            index: bootstrap.current_exercise_index,
            len: plan.len(),
        });
    }

    let resume = ResumePoint {
        current_index: bootstrap.current_exercise_index,
        totals: SessionTotals {
            sets_completed: bootstrap.total_sets_completed,
            calories_estimate: bootstrap.accumulated_calories,
        },
    };
    Ok((plan, resume))
}

fn strength(index: usize, name: &str, target_sets: u32, target_reps: u32) -> Exercise {
    Exercise::new(
        index,
        name,
        ExerciseGoal::Sets {
            target_sets,
            target_reps,
        },
        None,
    )
    .expect("built-in plan should be valid")
}

fn hold(index: usize, name: &str, duration_secs: u32) -> Exercise {
    Exercise::new(index, name, ExerciseGoal::Timed { duration_secs }, None)
        .expect("built-in plan should be valid")
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
