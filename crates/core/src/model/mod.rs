mod exercise;
mod ids;
mod plan;
mod session;

pub use exercise::{Exercise, ExerciseError, ExerciseGoal};
pub use ids::{CommandId, SessionId};
pub use plan::{PlanError, SessionKind, WorkoutPlan};
pub use session::{
    CALORIES_PER_STRENGTH_SET, CALORIES_PER_TEN_HOLD_SECS, ReportError, SessionFeedback,
    SessionMode, SessionPhase, SessionReport, SessionTotals,
};
