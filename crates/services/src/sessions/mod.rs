mod progress;
mod service;
mod workflow;

// Public API of the exercise subsystem.
pub use crate::error::SessionError;
pub use progress::SessionProgress;
pub use service::{ExerciseSession, SessionState, SessionStep};
pub use workflow::StudyService;
