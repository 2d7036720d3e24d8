use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::SessionKind;

//
// ─── PHASE / MODE / FEEDBACK ───────────────────────────────────────────────────
//

/// The single tagged state a live session occupies.
///
/// Replaces the juggling of independent `is_active`/`rest_active` flags: a
/// session is always in exactly one phase, and `Complete` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Exercise,
    Rest,
    Complete,
}

impl SessionPhase {
    /// No further mutation is accepted once a session is complete.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Determines whether progress is mirrored to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Authenticated,
    /// All writes stay local; no network calls are issued.
    Guest,
}

impl SessionMode {
    #[must_use]
    pub fn is_guest(self) -> bool {
        matches!(self, Self::Guest)
    }
}

/// Lightweight qualitative signal collected at completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionFeedback {
    Better,
    Same,
}

//
// ─── TOTALS ────────────────────────────────────────────────────────────────────
//

/// Flat per-set estimate for strength work; analytics proper live server-side.
pub const CALORIES_PER_STRENGTH_SET: u32 = 6;

/// Estimate per 10 seconds of a completed timed hold.
pub const CALORIES_PER_TEN_HOLD_SECS: u32 = 4;

/// Running totals shown alongside a live session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionTotals {
    pub sets_completed: u32,
    pub calories_estimate: u32,
}

impl SessionTotals {
    /// Accounts for one completed strength set.
    pub fn add_strength_set(&mut self) {
        self.sets_completed = self.sets_completed.saturating_add(1);
        self.calories_estimate = self
            .calories_estimate
            .saturating_add(CALORIES_PER_STRENGTH_SET);
    }

    /// Accounts for one completed timed hold of the given duration.
    pub fn add_timed_hold(&mut self, duration_secs: u32) {
        self.sets_completed = self.sets_completed.saturating_add(1);
        self.calories_estimate = self
            .calories_estimate
            .saturating_add(duration_secs / 10 * CALORIES_PER_TEN_HOLD_SECS);
    }
}

//
// ─── REPORT ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReportError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,
}

/// Final record of a finished session, handed to the backend mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    kind: SessionKind,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    duration_secs: u32,
    exercises_completed: u32,
    totals: SessionTotals,
    feedback: Option<SessionFeedback>,
}

impl SessionReport {
    /// Builds a completion report.
    ///
    /// `duration_secs` comes from the tick-counted session clock, not from
    /// the timestamp difference, so a paused session reports active time.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidTimeRange` if `completed_at` precedes
    /// `started_at`.
    pub fn new(
        kind: SessionKind,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        duration_secs: u32,
        exercises_completed: u32,
        totals: SessionTotals,
        feedback: Option<SessionFeedback>,
    ) -> Result<Self, ReportError> {
        if completed_at < started_at {
            return Err(ReportError::InvalidTimeRange);
        }

        Ok(Self {
            kind,
            started_at,
            completed_at,
            duration_secs,
            exercises_completed,
            totals,
            feedback,
        })
    }

    #[must_use]
    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    #[must_use]
    pub fn exercises_completed(&self) -> u32 {
        self.exercises_completed
    }

    #[must_use]
    pub fn totals(&self) -> SessionTotals {
        self.totals
    }

    #[must_use]
    pub fn feedback(&self) -> Option<SessionFeedback> {
        self.feedback
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    #[test]
    fn totals_accumulate_per_set() {
        let mut totals = SessionTotals::default();
        totals.add_strength_set();
        totals.add_strength_set();
        assert_eq!(totals.sets_completed, 2);
        assert_eq!(totals.calories_estimate, 2 * CALORIES_PER_STRENGTH_SET);

        totals.add_timed_hold(30);
        assert_eq!(totals.sets_completed, 3);
        assert_eq!(
            totals.calories_estimate,
            2 * CALORIES_PER_STRENGTH_SET + 3 * CALORIES_PER_TEN_HOLD_SECS
        );
    }

    #[test]
    fn report_rejects_inverted_time_range() {
        let err = SessionReport::new(
            SessionKind::FreeForm,
            fixed_now(),
            fixed_now() - Duration::seconds(1),
            0,
            0,
            SessionTotals::default(),
            None,
        )
        .unwrap_err();
        assert_eq!(err, ReportError::InvalidTimeRange);
    }

    #[test]
    fn feedback_uses_lowercase_wire_form() {
        assert_eq!(
            serde_json::to_string(&SessionFeedback::Better).unwrap(),
            "\"better\""
        );
        assert_eq!(
            serde_json::from_str::<SessionFeedback>("\"same\"").unwrap(),
            SessionFeedback::Same
        );
    }
}
