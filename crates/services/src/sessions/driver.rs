use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use super::controller::SessionController;

/// Owned one-second ticker driving a session's clocks.
///
/// Exactly one ticker should exist per running session. It stops itself when
/// the session completes, and must be stopped (or dropped) when the session
/// is paused or its screen goes away; an orphaned interval would keep
/// incrementing a detached counter.
pub struct SessionTicker {
    handle: JoinHandle<()>,
}

impl SessionTicker {
    /// Spawn the recurring tick task for the given session.
    ///
    /// The lock is held only for the synchronous tick itself, never across
    /// an await point.
    #[must_use]
    pub fn spawn(session: Arc<Mutex<SessionController>>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first interval tick completes immediately; skip it so the
            // first counted second is a real one.
            interval.tick().await;
            loop {
                interval.tick().await;
                let phase = {
                    let Ok(mut session) = session.lock() else {
                        break;
                    };
                    session.tick()
                };
                if phase.is_terminal() {
                    break;
                }
            }
        });
        Self { handle }
    }

    /// Stop ticking. Idempotent; also runs on drop.
    pub fn stop(&self) {
        self.handle.abort();
    }

    /// True once the tick task has ended, either via `stop()` or because the
    /// session completed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for SessionTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
