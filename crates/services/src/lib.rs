#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;
pub mod timer;

pub use fit_core::Clock;

pub use error::SessionError;
pub use sessions::{
    CompletionOutcome, SessionCompletion, SessionController, SessionFlowService, SessionSnapshot,
    SessionTicker,
};
pub use timer::{PhaseTick, PhaseTimer, SessionClock};
