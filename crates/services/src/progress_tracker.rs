use std::sync::Arc;

use lesson_core::model::{LessonNumber, ProgressRecord, ProgressSummary};
use storage::{ProgressRepository, StorageError};

/// Sole owner of the learner's progress record.
///
/// Every mutation goes through this type and is written back immediately.
/// Persistence problems are logged and never surface as failures: losing
/// progress is preferable to refusing to run.
pub struct ProgressTracker {
    repo: Arc<dyn ProgressRepository>,
    record: ProgressRecord,
}

impl ProgressTracker {
    /// Load persisted progress, falling back to defaults if none exists or it
    /// cannot be read.
    #[must_use]
    pub fn load(repo: Arc<dyn ProgressRepository>) -> Self {
        let record = match repo.load_progress() {
            Ok(Some(record)) => record,
            Ok(None) => ProgressRecord::default(),
            Err(err) => {
                tracing::warn!("error loading progress, starting fresh: {err}");
                ProgressRecord::default()
            }
        };
        Self { repo, record }
    }

    #[must_use]
    pub fn record(&self) -> &ProgressRecord {
        &self.record
    }

    /// Persist the current record, logging any failure.
    pub fn save(&self) {
        if let Err(err) = self.try_save() {
            tracing::error!("error saving progress: {err}");
        }
    }

    /// Persist the current record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    pub fn try_save(&self) -> Result<(), StorageError> {
        self.repo.save_progress(&self.record)
    }

    /// Mark `lesson` completed and persist. Repeated calls change nothing.
    pub fn mark_completed(&mut self, lesson: LessonNumber) {
        if self.record.mark_completed(lesson) {
            tracing::info!("lesson {lesson} completed");
            self.save();
        }
    }

    #[must_use]
    pub fn is_completed(&self, lesson: LessonNumber) -> bool {
        self.record.is_completed(lesson)
    }

    /// `last_completed_lesson + 1`. Not checked against the catalog.
    #[must_use]
    pub fn next_lesson(&self) -> LessonNumber {
        self.record.next_lesson()
    }

    #[must_use]
    pub fn current(&self) -> LessonNumber {
        self.record.current_lesson()
    }

    pub fn set_current(&mut self, lesson: LessonNumber) {
        if self.record.set_current_lesson(lesson) {
            self.save();
        }
    }

    /// Record how many lessons the last scan found. Written with the next save.
    pub fn set_total_lessons(&mut self, total: usize) {
        self.record.set_total_lessons_available(total);
    }

    #[must_use]
    pub fn summary(&self) -> ProgressSummary {
        self.record.summary()
    }
}

impl std::fmt::Debug for ProgressTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressTracker")
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::InMemoryRepository;

    /// Progress store whose writes always fail.
    struct ReadOnlyProgress;

    impl ProgressRepository for ReadOnlyProgress {
        fn load_progress(&self) -> Result<Option<ProgressRecord>, StorageError> {
            Ok(None)
        }

        fn save_progress(&self, _record: &ProgressRecord) -> Result<(), StorageError> {
            Err(StorageError::Io("read-only file system".into()))
        }
    }

    fn n(value: u32) -> LessonNumber {
        LessonNumber::new(value)
    }

    #[test]
    fn starts_from_defaults() {
        let tracker = ProgressTracker::load(Arc::new(InMemoryRepository::new()));
        assert_eq!(tracker.current(), n(1));
        assert_eq!(tracker.next_lesson(), n(1));
        assert!(!tracker.is_completed(n(1)));
    }

    #[test]
    fn mutations_are_persisted() {
        let repo = InMemoryRepository::new();
        let mut tracker = ProgressTracker::load(Arc::new(repo.clone()));
        tracker.mark_completed(n(1));
        tracker.set_current(n(2));

        let stored = repo.load_progress().unwrap().unwrap();
        assert!(stored.is_completed(n(1)));
        assert_eq!(stored.current_lesson(), n(2));

        let reloaded = ProgressTracker::load(Arc::new(repo));
        assert_eq!(reloaded.record(), tracker.record());
    }

    #[test]
    fn next_lesson_tracks_last_completed() {
        let mut tracker = ProgressTracker::load(Arc::new(InMemoryRepository::new()));
        for lesson in [2, 5, 3, 5] {
            tracker.mark_completed(n(lesson));
            assert_eq!(
                tracker.next_lesson(),
                tracker.record().last_completed_lesson().next()
            );
        }
        assert_eq!(tracker.next_lesson(), n(6));
    }

    #[test]
    fn scenario_one_of_three() {
        let mut tracker = ProgressTracker::load(Arc::new(InMemoryRepository::new()));
        tracker.set_total_lessons(3);
        tracker.mark_completed(n(1));

        assert_eq!(tracker.next_lesson(), n(2));
        assert!(tracker.is_completed(n(1)));
        assert!(!tracker.is_completed(n(2)));

        let summary = tracker.summary();
        assert_eq!(summary.total_lessons, 3);
        assert_eq!(summary.completed_count, 1);
        assert!((summary.completion_percentage - 33.33).abs() < 0.01);
        assert_eq!(summary.last_completed, n(1));
        assert_eq!(summary.next_lesson, n(2));
    }

    #[test]
    fn failed_writes_keep_in_memory_record() {
        let mut tracker = ProgressTracker::load(Arc::new(ReadOnlyProgress));
        tracker.mark_completed(n(1));
        tracker.set_current(n(2));

        assert!(tracker.is_completed(n(1)));
        assert_eq!(tracker.current(), n(2));
        assert_eq!(tracker.next_lesson(), n(2));
        assert!(matches!(tracker.try_save(), Err(StorageError::Io(_))));
    }
}
