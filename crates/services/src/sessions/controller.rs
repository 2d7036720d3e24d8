use chrono::{DateTime, Utc};

use fit_core::Clock;
use fit_core::model::{
    CommandId, Exercise, ExerciseGoal, SessionFeedback, SessionId, SessionKind, SessionMode,
    SessionPhase, SessionReport, SessionTotals, WorkoutPlan,
};

use super::plan::ResumePoint;
use super::sequencer::{Advance, ExerciseSequencer};
use super::snapshot::{ExerciseSnapshot, SessionSnapshot};
use crate::error::SessionError;
use crate::timer::{PhaseTick, PhaseTimer, SessionClock};

//
// ─── COMMANDS & RESULTS ────────────────────────────────────────────────────────
//

/// One locally-committed set queued for best-effort persistence.
///
/// The local reducer has already applied the mutation by the time this
/// exists; the command only mirrors it. `command_id` is the idempotency key.
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedSet {
    pub command_id: CommandId,
    pub exercise_index: usize,
    pub reps: u32,
    pub weight_kg: Option<f64>,
}

/// Result of logging a single set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetLogged {
    pub exercise_index: usize,
    /// Completed-set count for the exercise after the increment.
    pub set_number: u32,
    pub exercise_complete: bool,
    /// Phase after any transition the set triggered.
    pub phase: SessionPhase,
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Top-level orchestrator of one live session.
///
/// Owns the phase state machine, both timers and the exercise cursor, and is
/// the only mutation path for session state; observers read `snapshot()`.
/// All methods are synchronous and deterministic; the async driver and the
/// background sync live one layer up.
pub struct SessionController {
    session_id: SessionId,
    kind: SessionKind,
    mode: SessionMode,
    clock: Clock,
    sequencer: ExerciseSequencer,
    session_clock: SessionClock,
    timer: PhaseTimer,
    phase: SessionPhase,
    paused: bool,
    totals: SessionTotals,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    queued: Vec<QueuedSet>,
}

impl SessionController {
    /// Start a fresh session from a plan.
    #[must_use]
    pub fn new(plan: WorkoutPlan, mode: SessionMode, clock: Clock) -> Self {
        let (kind, exercises) = plan.into_parts();
        let mut controller = Self {
            session_id: SessionId::generate(),
            kind,
            mode,
            clock,
            sequencer: ExerciseSequencer::new(exercises),
            session_clock: SessionClock::new(),
            timer: PhaseTimer::new(),
            phase: SessionPhase::Exercise,
            paused: false,
            totals: SessionTotals::default(),
            started_at: clock.now(),
            completed_at: None,
            queued: Vec::new(),
        };
        controller.arm_for_exercise();
        controller
    }

    /// Start a session with progress restored from a backend bootstrap.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::CursorOutOfBounds` when the restored cursor
    /// does not fit the plan.
    pub fn with_progress(
        plan: WorkoutPlan,
        mode: SessionMode,
        clock: Clock,
        resume: ResumePoint,
    ) -> Result<Self, SessionError> {
        let (kind, exercises) = plan.into_parts();
        let sequencer = ExerciseSequencer::resume(exercises, resume.current_index)?;
        let mut controller = Self {
            session_id: SessionId::generate(),
            kind,
            mode,
            clock,
            sequencer,
            session_clock: SessionClock::new(),
            timer: PhaseTimer::new(),
            phase: SessionPhase::Exercise,
            paused: false,
            totals: resume.totals,
            started_at: clock.now(),
            completed_at: None,
            queued: Vec::new(),
        };
        if controller.sequencer.is_exhausted() {
            controller.complete();
        } else {
            controller.arm_for_exercise();
        }
        Ok(controller)
    }

    //
    // ─── ACCESSORS ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[must_use]
    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    #[must_use]
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase.is_terminal()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.sequencer.current_index()
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u32 {
        self.session_clock.elapsed_secs()
    }

    #[must_use]
    pub fn phase_remaining_secs(&self) -> u32 {
        self.timer.remaining_secs()
    }

    #[must_use]
    pub fn totals(&self) -> SessionTotals {
        self.totals
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Read-only view for observers; never hands out mutable state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.session_id,
            kind: self.kind,
            mode: self.mode,
            phase: self.phase,
            paused: self.paused,
            current_index: self.sequencer.current_index(),
            exercise_count: self.sequencer.len(),
            current_exercise: self
                .sequencer
                .current_exercise()
                .map(ExerciseSnapshot::from_exercise),
            phase_remaining_secs: self.timer.remaining_secs(),
            elapsed_secs: self.session_clock.elapsed_secs(),
            totals: self.totals,
        }
    }

    //
    // ─── TICKS ─────────────────────────────────────────────────────────────────
    //

    /// Advance one second of session time.
    ///
    /// No-op while paused or after completion; both timers freeze together.
    pub fn tick(&mut self) -> SessionPhase {
        if self.paused || self.phase.is_terminal() {
            return self.phase;
        }
        self.session_clock.tick();
        if let PhaseTick::Expired = self.timer.tick() {
            self.phase_expired();
        }
        self.phase
    }

    //
    // ─── USER ACTIONS ──────────────────────────────────────────────────────────
    //

    /// Log one completed set against the current exercise.
    ///
    /// The local state is updated immediately and the matching remote write
    /// is queued; callers flush the queue after the fact.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after the session finished,
    /// `SessionError::NotExercising` outside the exercise phase,
    /// `SessionError::EmptySet` for zero reps and
    /// `SessionError::WrongExercise` when the index is not current.
    pub fn log_set(
        &mut self,
        exercise_index: usize,
        reps: u32,
        weight_kg: Option<f64>,
    ) -> Result<SetLogged, SessionError> {
        if self.phase.is_terminal() {
            return Err(SessionError::Completed);
        }
        if self.phase != SessionPhase::Exercise {
            return Err(SessionError::NotExercising);
        }
        if reps == 0 {
            return Err(SessionError::EmptySet);
        }

        let outcome = self.sequencer.log_set(exercise_index)?;
        match self.sequencer.exercises()[exercise_index].goal() {
            ExerciseGoal::Sets { .. } => self.totals.add_strength_set(),
            ExerciseGoal::Timed { duration_secs } => self.totals.add_timed_hold(duration_secs),
        }
        let set_number = self.sequencer.exercises()[exercise_index].completed_sets();

        self.queued.push(QueuedSet {
            command_id: CommandId::generate(),
            exercise_index,
            reps,
            weight_kg,
        });

        if outcome.exercise_complete {
            self.timer.stop();
            self.exercise_done();
        }

        Ok(SetLogged {
            exercise_index,
            set_number,
            exercise_complete: outcome.exercise_complete,
            phase: self.phase,
        })
    }

    /// Skip the current phase.
    ///
    /// Forces the exact transition a phase expiry would produce. The
    /// countdown is zeroed before the transition runs, so a same-tick expiry
    /// cannot fire again and double-advance.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` once the session finished.
    pub fn skip(&mut self) -> Result<SessionPhase, SessionError> {
        if self.phase.is_terminal() {
            return Err(SessionError::Completed);
        }
        self.timer.expire_now();
        self.phase_expired();
        Ok(self.phase)
    }

    /// Freeze the session clock and phase countdown together.
    pub fn pause(&mut self) {
        if !self.phase.is_terminal() {
            self.paused = true;
        }
    }

    /// Resume ticking; elapsed and remaining values carry on unchanged.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Extend the running countdown, e.g. the "+30s" rest control.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after the session finished and
    /// `SessionError::NoCountdown` when no countdown is active.
    pub fn add_rest_secs(&mut self, extra: u32) -> Result<u32, SessionError> {
        if self.phase.is_terminal() {
            return Err(SessionError::Completed);
        }
        if !self.timer.is_armed() {
            return Err(SessionError::NoCountdown);
        }
        self.timer.add_secs(extra);
        Ok(self.timer.remaining_secs())
    }

    /// Hand over the writes queued by committed mutations.
    ///
    /// Local state never waits on their outcome.
    #[must_use]
    pub fn drain_queued(&mut self) -> Vec<QueuedSet> {
        std::mem::take(&mut self.queued)
    }

    /// Build the completion report once the session is done.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotCompleted` while the session is running.
    pub fn build_report(
        &self,
        feedback: Option<SessionFeedback>,
    ) -> Result<SessionReport, SessionError> {
        let completed_at = self.completed_at.ok_or(SessionError::NotCompleted)?;
        let exercises_completed =
            u32::try_from(self.sequencer.completed_count()).unwrap_or(u32::MAX);
        Ok(SessionReport::new(
            self.kind,
            self.started_at,
            completed_at,
            self.session_clock.elapsed_secs(),
            exercises_completed,
            self.totals,
            feedback,
        )?)
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Shared transition for natural expiry, skip and zero-out.
    fn phase_expired(&mut self) {
        match self.phase {
            SessionPhase::Exercise => {
                // A hold that ran out counts as its one completed set.
                let hold = self.sequencer.current_exercise().and_then(|exercise| {
                    match exercise.goal() {
                        ExerciseGoal::Timed { duration_secs } if !exercise.is_complete() => {
                            Some(duration_secs)
                        }
                        _ => None,
                    }
                });
                if let Some(duration_secs) = hold {
                    if let Some(exercise) = self.sequencer.current_exercise_mut() {
                        exercise.log_set();
                    }
                    self.totals.add_timed_hold(duration_secs);
                }
                self.exercise_done();
            }
            SessionPhase::Rest => self.rest_done(),
            SessionPhase::Complete => {}
        }
    }

    fn exercise_done(&mut self) {
        if self.sequencer.is_on_last() {
            // No trailing rest after the final exercise; the cursor parks at
            // len() so it equals the exercise count exactly when complete.
            self.sequencer.advance();
            self.complete();
        } else {
            self.phase = SessionPhase::Rest;
            let rest_secs = self
                .sequencer
                .current_exercise()
                .map_or(self.kind.default_rest_secs(), |exercise| {
                    exercise.rest_secs_or(self.kind.default_rest_secs())
                });
            if rest_secs == 0 {
                // A zero rest skips the rest phase entirely.
                self.rest_done();
            } else {
                self.timer.restart(rest_secs);
            }
        }
    }

    fn rest_done(&mut self) {
        match self.sequencer.advance() {
            Advance::Next(_) => self.arm_for_exercise(),
            Advance::SessionComplete => self.complete(),
        }
    }

    fn arm_for_exercise(&mut self) {
        self.phase = SessionPhase::Exercise;
        match self.sequencer.current_exercise().map(Exercise::goal) {
            Some(ExerciseGoal::Timed { duration_secs }) => self.timer.restart(duration_secs),
            _ => self.timer.stop(),
        }
    }

    fn complete(&mut self) {
        self.timer.stop();
        self.phase = SessionPhase::Complete;
        self.completed_at = Some(self.clock.now());
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("session_id", &self.session_id)
            .field("kind", &self.kind)
            .field("mode", &self.mode)
            .field("phase", &self.phase)
            .field("paused", &self.paused)
            .field("current_index", &self.sequencer.current_index())
            .field("exercise_count", &self.sequencer.len())
            .field("elapsed_secs", &self.session_clock.elapsed_secs())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
