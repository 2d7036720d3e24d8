use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::records::{CompletionAck, CompletionRecord, SessionBootstrap, SetRecord};

/// Errors surfaced by backend adapters.
///
/// Transport-neutral on purpose: the engine treats the backend as an
/// eventually-consistent mirror and mostly logs these.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BackendError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("backend rejected the request with status {status}")]
    Rejected { status: u16 },

    #[error("malformed backend payload: {0}")]
    Payload(String),
}

/// Remote collaborator contract for live sessions.
///
/// Local state stays authoritative for a running session; these calls mirror
/// it after the fact.
#[async_trait]
pub trait WorkoutBackend: Send + Sync {
    /// Fetch or initialize a free-form strength session.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` when the backend cannot provide a session; the
    /// caller falls back to a local guest plan.
    async fn start_session(&self) -> Result<SessionBootstrap, BackendError>;

    /// Fetch today's corrective exercise sequence.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` when the plan cannot be fetched; the caller
    /// falls back to a local guest plan.
    async fn daily_plan(&self) -> Result<SessionBootstrap, BackendError>;

    /// Persist one completed set.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on failure; callers issue this fire-and-forget
    /// and only log the error.
    async fn log_set(&self, set: &SetRecord) -> Result<(), BackendError>;

    /// Finalize a session.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on failure; surfaced softly (the session can
    /// still be exited).
    async fn complete_session(
        &self,
        completion: &CompletionRecord,
    ) -> Result<CompletionAck, BackendError>;
}

//
// ─── IN-MEMORY BACKEND ─────────────────────────────────────────────────────────
//

#[derive(Default)]
struct InMemoryState {
    bootstrap: Option<SessionBootstrap>,
    daily_plan: Option<SessionBootstrap>,
    logged_sets: Vec<SetRecord>,
    completions: Vec<CompletionRecord>,
    calls: usize,
    fail_fetch: bool,
    fail_log_set: bool,
    fail_complete: bool,
}

/// In-memory backend for tests and prototyping.
///
/// Records every call and can be scripted to fail each operation.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the bootstrap returned by `start_session`.
    #[must_use]
    pub fn with_bootstrap(self, bootstrap: SessionBootstrap) -> Self {
        self.lock().bootstrap = Some(bootstrap);
        self
    }

    /// Seed the bootstrap returned by `daily_plan`.
    #[must_use]
    pub fn with_daily_plan(self, bootstrap: SessionBootstrap) -> Self {
        self.lock().daily_plan = Some(bootstrap);
        self
    }

    /// Make both fetch operations fail, forcing the guest fallback.
    #[must_use]
    pub fn with_failing_fetch(self) -> Self {
        self.lock().fail_fetch = true;
        self
    }

    /// Make `log_set` fail.
    #[must_use]
    pub fn with_failing_log_set(self) -> Self {
        self.lock().fail_log_set = true;
        self
    }

    /// Make `complete_session` fail.
    #[must_use]
    pub fn with_failing_completion(self) -> Self {
        self.lock().fail_complete = true;
        self
    }

    /// Every set that reached the backend, in arrival order.
    #[must_use]
    pub fn logged_sets(&self) -> Vec<SetRecord> {
        self.lock().logged_sets.clone()
    }

    /// Every completion record that reached the backend.
    #[must_use]
    pub fn completions(&self) -> Vec<CompletionRecord> {
        self.lock().completions.clone()
    }

    /// Total number of calls made against this backend.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.lock().calls
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InMemoryState> {
        self.state.lock().expect("in-memory backend lock poisoned")
    }
}

#[async_trait]
impl WorkoutBackend for InMemoryBackend {
    async fn start_session(&self) -> Result<SessionBootstrap, BackendError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;
        state.calls += 1;
        if state.fail_fetch {
            return Err(BackendError::Unavailable("scripted failure".into()));
        }
        state
            .bootstrap
            .clone()
            .ok_or_else(|| BackendError::Unavailable("no bootstrap seeded".into()))
    }

    async fn daily_plan(&self) -> Result<SessionBootstrap, BackendError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;
        state.calls += 1;
        if state.fail_fetch {
            return Err(BackendError::Unavailable("scripted failure".into()));
        }
        state
            .daily_plan
            .clone()
            .ok_or_else(|| BackendError::Unavailable("no daily plan seeded".into()))
    }

    async fn log_set(&self, set: &SetRecord) -> Result<(), BackendError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;
        state.calls += 1;
        if state.fail_log_set {
            return Err(BackendError::Unavailable("scripted failure".into()));
        }
        state.logged_sets.push(set.clone());
        Ok(())
    }

    async fn complete_session(
        &self,
        completion: &CompletionRecord,
    ) -> Result<CompletionAck, BackendError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;
        state.calls += 1;
        if state.fail_complete {
            return Err(BackendError::Unavailable("scripted failure".into()));
        }
        state.completions.push(completion.clone());
        Ok(CompletionAck {
            message: "Session saved. Nice work!".into(),
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
