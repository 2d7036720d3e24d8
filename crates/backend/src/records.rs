use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fit_core::model::{
    CommandId, Exercise, ExerciseError, ExerciseGoal, SessionFeedback, SessionId, SessionReport,
};

//
// ─── EXERCISE RECORD ───────────────────────────────────────────────────────────
//

/// Wire shape for one plan entry.
///
/// Mirrors the domain `Exercise` so transports can serialize without leaking
/// backend concerns into the domain layer. A record with `duration_secs` set
/// is a timed hold; otherwise `target_sets`/`target_reps` describe strength
/// work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    pub index: usize,
    pub name: String,
    #[serde(default)]
    pub target_sets: Option<u32>,
    #[serde(default)]
    pub target_reps: Option<u32>,
    #[serde(default)]
    pub duration_secs: Option<u32>,
    #[serde(default)]
    pub completed_sets: u32,
    #[serde(default)]
    pub rest_secs: Option<u32>,
}

impl ExerciseRecord {
    #[must_use]
    pub fn from_exercise(exercise: &Exercise) -> Self {
        let (target_sets, target_reps, duration_secs) = match exercise.goal() {
            ExerciseGoal::Sets {
                target_sets,
                target_reps,
            } => (Some(target_sets), Some(target_reps), None),
            ExerciseGoal::Timed { duration_secs } => (None, None, Some(duration_secs)),
        };

        Self {
            index: exercise.index(),
            name: exercise.name().to_owned(),
            target_sets,
            target_reps,
            duration_secs,
            completed_sets: exercise.completed_sets(),
            rest_secs: exercise.rest_secs(),
        }
    }

    /// Convert the record back into a domain `Exercise`.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseError` when the record fails domain validation, e.g.
    /// a missing goal or a persisted set count past the target.
    pub fn into_exercise(self) -> Result<Exercise, ExerciseError> {
        let goal = match self.duration_secs {
            Some(duration_secs) => ExerciseGoal::Timed { duration_secs },
            None => ExerciseGoal::Sets {
                // Missing fields surface as zero-target validation errors.
                target_sets: self.target_sets.unwrap_or(0),
                target_reps: self.target_reps.unwrap_or(0),
            },
        };

        Exercise::from_persisted(
            self.index,
            self.name,
            goal,
            self.completed_sets,
            self.rest_secs,
        )
    }
}

//
// ─── SESSION BOOTSTRAP ─────────────────────────────────────────────────────────
//

/// Server response that initializes (or resumes) a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionBootstrap {
    pub exercises: Vec<ExerciseRecord>,
    #[serde(default)]
    pub current_exercise_index: usize,
    #[serde(default)]
    pub accumulated_calories: u32,
    #[serde(default)]
    pub total_sets_completed: u32,
}

//
// ─── WRITES ────────────────────────────────────────────────────────────────────
//

/// Fire-and-forget persistence of one completed set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetRecord {
    pub session_id: SessionId,
    /// Idempotency key; the backend may deduplicate retried deliveries on it.
    pub command_id: CommandId,
    pub exercise_index: usize,
    pub reps: u32,
    #[serde(default)]
    pub weight_kg: Option<f64>,
}

/// Finalization payload for a finished session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub session_id: SessionId,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration_secs: u32,
    pub exercises_completed: u32,
    pub sets_completed: u32,
    pub calories_estimate: u32,
    #[serde(default)]
    pub feedback: Option<SessionFeedback>,
}

impl CompletionRecord {
    #[must_use]
    pub fn from_report(session_id: SessionId, report: &SessionReport) -> Self {
        Self {
            session_id,
            started_at: report.started_at(),
            completed_at: report.completed_at(),
            duration_secs: report.duration_secs(),
            exercises_completed: report.exercises_completed(),
            sets_completed: report.totals().sets_completed,
            calories_estimate: report.totals().calories_estimate,
            feedback: report.feedback(),
        }
    }
}

/// Server acknowledgement for a completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionAck {
    pub message: String,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exercise_record_roundtrips_strength_work() {
        let exercise = Exercise::new(
            2,
            "Bent-over Row",
            ExerciseGoal::Sets {
                target_sets: 3,
                target_reps: 10,
            },
            Some(90),
        )
        .unwrap();

        let record = ExerciseRecord::from_exercise(&exercise);
        assert_eq!(record.target_sets, Some(3));
        assert_eq!(record.duration_secs, None);
        assert_eq!(record.into_exercise().unwrap(), exercise);
    }

    #[test]
    fn record_without_goal_fails_validation() {
        let record = ExerciseRecord {
            index: 0,
            name: "Mystery".into(),
            target_sets: None,
            target_reps: None,
            duration_secs: None,
            completed_sets: 0,
            rest_secs: None,
        };
        assert!(record.into_exercise().is_err());
    }

    #[test]
    fn record_caps_persisted_sets() {
        let record = ExerciseRecord {
            index: 0,
            name: "Push-up".into(),
            target_sets: Some(2),
            target_reps: Some(12),
            duration_secs: None,
            completed_sets: 5,
            rest_secs: None,
        };
        assert_eq!(
            record.into_exercise().unwrap_err(),
            ExerciseError::TooManySets {
                completed: 5,
                target: 2
            }
        );
    }

    #[test]
    fn bootstrap_defaults_resume_fields() {
        let bootstrap: SessionBootstrap = serde_json::from_str(
            r#"{"exercises":[{"index":0,"name":"Chin Tuck","duration_secs":30}]}"#,
        )
        .unwrap();
        assert_eq!(bootstrap.current_exercise_index, 0);
        assert_eq!(bootstrap.accumulated_calories, 0);
        assert_eq!(bootstrap.total_sets_completed, 0);
        assert_eq!(bootstrap.exercises[0].duration_secs, Some(30));
    }
}
