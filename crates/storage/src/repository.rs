use lesson_core::model::{Lesson, LessonNumber, LessonSummary, ProgressRecord};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("parse error: {0}")]
    Parse(String),

    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            StorageError::NotFound
        } else {
            StorageError::Io(err.to_string())
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            StorageError::Io(err.to_string())
        } else {
            StorageError::Parse(err.to_string())
        }
    }
}

/// Read-only source of lessons.
pub trait LessonRepository: Send + Sync {
    /// List every readable lesson, sorted by number.
    ///
    /// Unreadable entries are skipped rather than failing the whole listing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the listing itself cannot be produced.
    fn list_lessons(&self) -> Result<Vec<LessonSummary>, StorageError>;

    /// Fetch and fully parse one lesson.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if there is no such lesson,
    /// `StorageError::Parse` if it is malformed, or `StorageError::Io`.
    fn get_lesson(&self, number: LessonNumber) -> Result<Lesson, StorageError>;
}

/// Single-record store for learner progress.
pub trait ProgressRepository: Send + Sync {
    /// Load the stored record, or `None` if nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Parse` for a corrupt record or `StorageError::Io`.
    fn load_progress(&self) -> Result<Option<ProgressRecord>, StorageError>;

    /// Replace the stored record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the record cannot be written.
    fn save_progress(&self, record: &ProgressRecord) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    lessons: Arc<Mutex<BTreeMap<LessonNumber, Lesson>>>,
    progress: Arc<Mutex<Option<ProgressRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_lessons(lessons: impl IntoIterator<Item = Lesson>) -> Self {
        let lessons = lessons
            .into_iter()
            .map(|lesson| (lesson.number(), lesson))
            .collect();
        Self {
            lessons: Arc::new(Mutex::new(lessons)),
            progress: Arc::default(),
        }
    }

    /// Add or replace a lesson.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the lock is poisoned.
    pub fn insert_lesson(&self, lesson: Lesson) -> Result<(), StorageError> {
        let mut guard = self
            .lessons
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        guard.insert(lesson.number(), lesson);
        Ok(())
    }
}

impl LessonRepository for InMemoryRepository {
    fn list_lessons(&self) -> Result<Vec<LessonSummary>, StorageError> {
        let guard = self
            .lessons
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(guard.values().map(Lesson::summary).collect())
    }

    fn get_lesson(&self, number: LessonNumber) -> Result<Lesson, StorageError> {
        let guard = self
            .lessons
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        guard.get(&number).cloned().ok_or(StorageError::NotFound)
    }
}

impl ProgressRepository for InMemoryRepository {
    fn load_progress(&self) -> Result<Option<ProgressRecord>, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(guard.clone())
    }

    fn save_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        *guard = Some(record.clone());
        Ok(())
    }
}

/// Aggregates lesson and progress repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub lessons: Arc<dyn LessonRepository>,
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let lessons: Arc<dyn LessonRepository> = Arc::new(repo.clone());
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo);
        Self { lessons, progress }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_lesson(number: u32) -> Lesson {
        Lesson::new(
            LessonNumber::new(number),
            format!("Lesson {number}"),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        )
        .unwrap()
    }

    #[test]
    fn lists_lessons_in_order() {
        let repo = InMemoryRepository::with_lessons([build_lesson(3)]);
        repo.insert_lesson(build_lesson(1)).unwrap();
        let numbers: Vec<u32> = repo
            .list_lessons()
            .unwrap()
            .iter()
            .map(|s| s.number.value())
            .collect();
        assert_eq!(numbers, vec![1, 3]);
    }

    #[test]
    fn missing_lesson_is_not_found() {
        let repo = InMemoryRepository::new();
        let err = repo.get_lesson(LessonNumber::new(9)).unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[test]
    fn progress_round_trips() {
        let repo = InMemoryRepository::new();
        assert!(repo.load_progress().unwrap().is_none());

        let mut record = ProgressRecord::default();
        record.mark_completed(LessonNumber::new(2));
        repo.save_progress(&record).unwrap();
        assert_eq!(repo.load_progress().unwrap(), Some(record));
    }

    #[test]
    fn io_not_found_maps_to_not_found() {
        let err: StorageError = std::io::Error::from(std::io::ErrorKind::NotFound).into();
        assert!(matches!(err, StorageError::NotFound));
        let err: StorageError = std::io::Error::from(std::io::ErrorKind::PermissionDenied).into();
        assert!(matches!(err, StorageError::Io(_)));
    }
}
