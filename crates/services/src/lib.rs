#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod progress_tracker;
pub mod sessions;
pub mod vocabulary_review;

pub use sessions as session;

pub use catalog::{LessonCatalog, LessonListItem};
pub use error::{CatalogError, SessionError, StudyError};
pub use progress_tracker::ProgressTracker;
pub use vocabulary_review::{LessonVocabulary, ReviewWord, VocabularyReview};

pub use sessions::{ExerciseSession, SessionProgress, SessionState, SessionStep, StudyService};
