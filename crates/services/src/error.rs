//! Shared error types for the services crate.

use thiserror::Error;

use lesson_core::model::{EvaluationError, LessonNumber};
use storage::StorageError;

/// Errors emitted by `LessonCatalog::load`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("lesson {0} not found")]
    NotFound(LessonNumber),
    #[error("lesson {number} is malformed: {reason}")]
    Parse { number: LessonNumber, reason: String },
    #[error("lesson {number} could not be read: {reason}")]
    Io { number: LessonNumber, reason: String },
}

impl CatalogError {
    pub(crate) fn from_storage(number: LessonNumber, err: StorageError) -> Self {
        match err {
            StorageError::NotFound => CatalogError::NotFound(number),
            StorageError::Parse(reason) => CatalogError::Parse { number, reason },
            other => CatalogError::Io {
                number,
                reason: other.to_string(),
            },
        }
    }
}

/// Errors emitted by exercise sessions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("all exercises already completed")]
    Completed,
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

/// Errors emitted by `StudyService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudyError {
    #[error("no lesson selected")]
    NoLessonSelected,
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
