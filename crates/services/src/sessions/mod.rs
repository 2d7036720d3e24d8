mod controller;
mod driver;
mod plan;
mod sequencer;
mod snapshot;
mod sync;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use controller::{QueuedSet, SessionController, SetLogged};
pub use driver::SessionTicker;
pub use plan::{ResumePoint, bootstrap_plan, demo_plan};
pub use sequencer::{Advance, ExerciseSequencer, SetOutcome};
pub use snapshot::{ExerciseSnapshot, SessionSnapshot};
pub use sync::{CompletionOutcome, ProgressSync};
pub use workflow::{SessionCompletion, SessionFlowService};
