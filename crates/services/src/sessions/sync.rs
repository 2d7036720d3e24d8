use std::sync::Arc;

use backend::{CompletionRecord, SetRecord, WorkoutBackend};
use fit_core::model::{SessionId, SessionMode, SessionReport};

use super::controller::QueuedSet;

/// Result of the completion write, the one sync that is surfaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Guest session: nothing to mirror, completion is local by design.
    Local,
    /// Backend acknowledged the completion.
    Synced { message: String },
    /// Backend write failed. The session can still be exited; only the
    /// success message is withheld.
    Failed,
}

impl CompletionOutcome {
    /// Server message to show, when one arrived.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Synced { message } => Some(message),
            Self::Local | Self::Failed => None,
        }
    }
}

/// Mirrors locally-committed progress to the backend, best-effort.
///
/// Local state is always updated before any of this runs and is never rolled
/// back on failure; the backend is an eventually-consistent mirror.
#[derive(Clone)]
pub struct ProgressSync {
    backend: Arc<dyn WorkoutBackend>,
}

impl ProgressSync {
    #[must_use]
    pub fn new(backend: Arc<dyn WorkoutBackend>) -> Self {
        Self { backend }
    }

    /// Fire-and-forget persistence of queued sets.
    ///
    /// Guest sessions skip the network entirely. Failures are logged and
    /// dropped; the caller is never interrupted. Must run inside a tokio
    /// runtime.
    pub fn dispatch(&self, session_id: SessionId, mode: SessionMode, queued: Vec<QueuedSet>) {
        if mode.is_guest() {
            if !queued.is_empty() {
                tracing::debug!(count = queued.len(), "guest session, keeping sets local");
            }
            return;
        }

        for set in queued {
            let backend = Arc::clone(&self.backend);
            let record = SetRecord {
                session_id,
                command_id: set.command_id,
                exercise_index: set.exercise_index,
                reps: set.reps,
                weight_kg: set.weight_kg,
            };
            tokio::spawn(async move {
                if let Err(error) = backend.log_set(&record).await {
                    tracing::warn!(
                        %error,
                        exercise_index = record.exercise_index,
                        command_id = %record.command_id,
                        "failed to mirror set; local state stays authoritative"
                    );
                }
            });
        }
    }

    /// Finalize the session with the backend.
    ///
    /// The only awaited write: its failure is reported through the outcome
    /// rather than raised, so the caller can always exit the session.
    pub async fn complete_session(
        &self,
        session_id: SessionId,
        mode: SessionMode,
        report: &SessionReport,
    ) -> CompletionOutcome {
        if mode.is_guest() {
            tracing::debug!(%session_id, "guest session completed locally");
            return CompletionOutcome::Local;
        }

        let record = CompletionRecord::from_report(session_id, report);
        match self.backend.complete_session(&record).await {
            Ok(ack) => CompletionOutcome::Synced {
                message: ack.message,
            },
            Err(error) => {
                tracing::warn!(%error, %session_id, "failed to finalize session with backend");
                CompletionOutcome::Failed
            }
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use backend::InMemoryBackend;
    use fit_core::model::{CommandId, SessionKind, SessionTotals};
    use fit_core::time::fixed_now;

    fn queued(exercise_index: usize, reps: u32) -> QueuedSet {
        QueuedSet {
            command_id: CommandId::generate(),
            exercise_index,
            reps,
            weight_kg: None,
        }
    }

    fn report() -> SessionReport {
        SessionReport::new(
            SessionKind::FreeForm,
            fixed_now(),
            fixed_now(),
            300,
            3,
            SessionTotals {
                sets_completed: 6,
                calories_estimate: 36,
            },
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn guest_mode_never_touches_the_backend() {
        let backend = InMemoryBackend::new();
        let sync = ProgressSync::new(Arc::new(backend.clone()));
        let session_id = SessionId::generate();

        sync.dispatch(session_id, SessionMode::Guest, vec![queued(0, 10)]);
        let outcome = sync
            .complete_session(session_id, SessionMode::Guest, &report())
            .await;

        assert_eq!(outcome, CompletionOutcome::Local);
        tokio::task::yield_now().await;
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn dispatched_sets_reach_the_backend() {
        let backend = InMemoryBackend::new();
        let sync = ProgressSync::new(Arc::new(backend.clone()));
        let session_id = SessionId::generate();

        sync.dispatch(
            session_id,
            SessionMode::Authenticated,
            vec![queued(0, 10), queued(0, 8)],
        );

        // Let the fire-and-forget tasks run.
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
        let sets = backend.logged_sets();
        assert_eq!(sets.len(), 2);
        assert!(sets.iter().all(|set| set.session_id == session_id));
    }

    #[tokio::test]
    async fn failed_dispatch_is_swallowed() {
        let backend = InMemoryBackend::new().with_failing_log_set();
        let sync = ProgressSync::new(Arc::new(backend.clone()));

        // No panic, no error surfaced.
        sync.dispatch(
            SessionId::generate(),
            SessionMode::Authenticated,
            vec![queued(0, 10)],
        );
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
        assert!(backend.logged_sets().is_empty());
    }

    #[tokio::test]
    async fn failed_completion_is_soft() {
        let backend = InMemoryBackend::new().with_failing_completion();
        let sync = ProgressSync::new(Arc::new(backend));

        let outcome = sync
            .complete_session(SessionId::generate(), SessionMode::Authenticated, &report())
            .await;
        assert_eq!(outcome, CompletionOutcome::Failed);
        assert_eq!(outcome.message(), None);
    }

    #[tokio::test]
    async fn successful_completion_carries_the_message() {
        let backend = InMemoryBackend::new();
        let sync = ProgressSync::new(Arc::new(backend.clone()));

        let outcome = sync
            .complete_session(SessionId::generate(), SessionMode::Authenticated, &report())
            .await;
        assert!(matches!(outcome, CompletionOutcome::Synced { .. }));
        assert_eq!(backend.completions().len(), 1);
        assert_eq!(backend.completions()[0].duration_secs, 300);
    }
}
