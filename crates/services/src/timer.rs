//! Owned, tick-driven timer primitives.
//!
//! One `tick()` equals one elapsed second. The timers never touch real time
//! themselves; `SessionTicker` owns the recurring interval and feeds ticks
//! through the controller, which keeps every timing rule deterministic and
//! testable.

//
// ─── SESSION CLOCK ─────────────────────────────────────────────────────────────
//

/// Free-running elapsed-seconds counter for a whole session.
///
/// The controller gates ticks on pause and completion, so the clock itself
/// stays trivial: it only ever counts forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionClock {
    elapsed_secs: u32,
}

impl SessionClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one elapsed second.
    pub fn tick(&mut self) {
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }
}

//
// ─── PHASE TIMER ───────────────────────────────────────────────────────────────
//

/// Outcome of ticking the phase timer once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseTick {
    /// Timer is not armed; nothing to count.
    Idle,
    /// Still counting down.
    Running { remaining: u32 },
    /// Reached zero on this tick. Emitted exactly once per arming.
    Expired,
}

/// Single-purpose countdown for the current phase.
///
/// Exactly one phase timer exists per session. Changing phase always goes
/// through `restart`, which discards any residual state from the previous
/// phase. The timer reports expiry but never decides what happens next;
/// that transition belongs to the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseTimer {
    remaining_secs: u32,
    armed: bool,
}

impl PhaseTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer for a fresh phase of the given length.
    pub fn restart(&mut self, duration_secs: u32) {
        self.remaining_secs = duration_secs;
        self.armed = true;
    }

    /// Disarm without firing. Safe to call on an idle timer.
    pub fn stop(&mut self) {
        self.armed = false;
        self.remaining_secs = 0;
    }

    /// Extend the running countdown, e.g. the "+30s" control.
    ///
    /// Ignored while the timer is idle.
    pub fn add_secs(&mut self, extra: u32) {
        if self.armed {
            self.remaining_secs = self.remaining_secs.saturating_add(extra);
        }
    }

    /// Zero out the countdown right now instead of waiting for the tick.
    ///
    /// Returns true when the timer was armed and has now fired; the caller
    /// performs the expiry transition itself, so a manual zero-out and a
    /// natural expiry share one code path.
    pub fn expire_now(&mut self) -> bool {
        if !self.armed {
            return false;
        }
        self.stop();
        true
    }

    /// Count one second down.
    pub fn tick(&mut self) -> PhaseTick {
        if !self.armed {
            return PhaseTick::Idle;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.armed = false;
            PhaseTick::Expired
        } else {
            PhaseTick::Running {
                remaining: self.remaining_secs,
            }
        }
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_counts_forward() {
        let mut clock = SessionClock::new();
        for _ in 0..5 {
            clock.tick();
        }
        assert_eq!(clock.elapsed_secs(), 5);
    }

    #[test]
    fn countdown_expires_exactly_once() {
        let mut timer = PhaseTimer::new();
        timer.restart(3);

        assert_eq!(timer.tick(), PhaseTick::Running { remaining: 2 });
        assert_eq!(timer.tick(), PhaseTick::Running { remaining: 1 });
        assert_eq!(timer.tick(), PhaseTick::Expired);
        // Once fired, the timer is idle until restarted.
        assert_eq!(timer.tick(), PhaseTick::Idle);
        assert!(!timer.is_armed());
    }

    #[test]
    fn restart_discards_residual_time() {
        let mut timer = PhaseTimer::new();
        timer.restart(30);
        let _ = timer.tick();
        timer.restart(15);
        assert_eq!(timer.remaining_secs(), 15);
        assert_eq!(timer.tick(), PhaseTick::Running { remaining: 14 });
    }

    #[test]
    fn add_secs_extends_running_countdown_only() {
        let mut timer = PhaseTimer::new();
        timer.add_secs(30);
        assert_eq!(timer.remaining_secs(), 0);

        timer.restart(10);
        timer.add_secs(30);
        assert_eq!(timer.remaining_secs(), 40);
    }

    #[test]
    fn expire_now_fires_once_and_disarms() {
        let mut timer = PhaseTimer::new();
        assert!(!timer.expire_now());

        timer.restart(45);
        assert!(timer.expire_now());
        assert!(!timer.expire_now());
        assert_eq!(timer.tick(), PhaseTick::Idle);
    }

    #[test]
    fn stopped_timer_never_fires() {
        let mut timer = PhaseTimer::new();
        timer.restart(2);
        timer.stop();
        assert_eq!(timer.tick(), PhaseTick::Idle);
        assert_eq!(timer.tick(), PhaseTick::Idle);
    }
}
