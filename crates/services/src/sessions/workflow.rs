use std::sync::Arc;

use backend::WorkoutBackend;
use fit_core::Clock;
use fit_core::model::{SessionFeedback, SessionKind, SessionMode, SessionReport};

use super::controller::{SessionController, SetLogged};
use super::plan::{bootstrap_plan, demo_plan};
use super::sync::{CompletionOutcome, ProgressSync};
use crate::error::SessionError;

/// Report plus the soft result of mirroring it.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionCompletion {
    pub report: SessionReport,
    pub outcome: CompletionOutcome,
}

/// Orchestrates session start, set logging and completion against the
/// backend mirror.
#[derive(Clone)]
pub struct SessionFlowService {
    clock: Clock,
    backend: Arc<dyn WorkoutBackend>,
    sync: ProgressSync,
}

impl SessionFlowService {
    #[must_use]
    pub fn new(clock: Clock, backend: Arc<dyn WorkoutBackend>) -> Self {
        let sync = ProgressSync::new(Arc::clone(&backend));
        Self {
            clock,
            backend,
            sync,
        }
    }

    /// Start a session of the given kind.
    ///
    /// A backend failure is recovered locally: the session starts from the
    /// built-in plan in guest mode and the error is never surfaced.
    pub async fn start_session(&self, kind: SessionKind) -> SessionController {
        let fetched = match kind {
            SessionKind::FreeForm => self.backend.start_session().await,
            SessionKind::Corrective => self.backend.daily_plan().await,
        };

        match fetched {
            Ok(bootstrap) => match bootstrap_plan(kind, bootstrap) {
                Ok((plan, resume)) => {
                    match SessionController::with_progress(
                        plan,
                        SessionMode::Authenticated,
                        self.clock,
                        resume,
                    ) {
                        Ok(controller) => return controller,
                        Err(error) => {
                            tracing::warn!(%error, "backend bootstrap unusable, starting guest session");
                        }
                    }
                }
                Err(error) => {
                    tracing::warn!(%error, "malformed backend plan, starting guest session");
                }
            },
            Err(error) => {
                tracing::warn!(%error, "could not reach backend, starting guest session");
            }
        }

        self.start_guest(kind)
    }

    /// Start a guest session from the built-in plan, without touching the
    /// network.
    #[must_use]
    pub fn start_guest(&self, kind: SessionKind) -> SessionController {
        SessionController::new(demo_plan(kind), SessionMode::Guest, self.clock)
    }

    /// Log one set and mirror it in the background.
    ///
    /// The local mutation commits first; the remote write is fired after and
    /// never awaited.
    ///
    /// # Errors
    ///
    /// Propagates the controller's contract errors; sync failures are not
    /// among them.
    pub fn log_set(
        &self,
        session: &mut SessionController,
        exercise_index: usize,
        reps: u32,
        weight_kg: Option<f64>,
    ) -> Result<SetLogged, SessionError> {
        let logged = session.log_set(exercise_index, reps, weight_kg)?;
        self.flush(session);
        Ok(logged)
    }

    /// Build the final report and mirror it.
    ///
    /// A failed completion write is surfaced softly through the outcome; the
    /// caller can always exit the session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotCompleted` while the session is running.
    pub async fn finalize(
        &self,
        session: &mut SessionController,
        feedback: Option<SessionFeedback>,
    ) -> Result<SessionCompletion, SessionError> {
        // Any sets still queued go out before the completion record.
        self.flush(session);
        let report = session.build_report(feedback)?;
        let outcome = self
            .sync
            .complete_session(session.session_id(), session.mode(), &report)
            .await;
        Ok(SessionCompletion { report, outcome })
    }

    fn flush(&self, session: &mut SessionController) {
        let queued = session.drain_queued();
        self.sync
            .dispatch(session.session_id(), session.mode(), queued);
    }
}
