use std::sync::Arc;

use lesson_core::model::{
    Answer, AnswerResult, Lesson, LessonNumber, LessonOverview, ProgressSummary, VocabEntry,
    VocabPager,
};
use storage::Storage;

use super::service::{ExerciseSession, SessionStep};
use crate::catalog::{LessonCatalog, LessonListItem};
use crate::error::StudyError;
use crate::progress_tracker::ProgressTracker;
use crate::vocabulary_review::VocabularyReview;

/// The lesson currently open, with its exercise session and vocabulary page.
struct OpenLesson {
    lesson: Arc<Lesson>,
    session: ExerciseSession,
    vocab: VocabPager,
}

/// Entry point for a hosting UI: receives intents and exposes read-only state.
pub struct StudyService {
    catalog: LessonCatalog,
    tracker: ProgressTracker,
    open: Option<OpenLesson>,
}

impl StudyService {
    /// Load progress and scan lessons.
    #[must_use]
    pub fn new(storage: &Storage) -> Self {
        let catalog = LessonCatalog::new(Arc::clone(&storage.lessons));
        let tracker = ProgressTracker::load(Arc::clone(&storage.progress));
        let mut service = Self {
            catalog,
            tracker,
            open: None,
        };
        service.rescan();
        service
    }

    /// Re-read the lesson directory and refresh the available-lesson count.
    pub fn rescan(&mut self) {
        let total = self.catalog.scan().len();
        self.tracker.set_total_lessons(total);
    }

    #[must_use]
    pub fn catalog(&self) -> &LessonCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    #[must_use]
    pub fn lessons(&self) -> Vec<LessonListItem> {
        self.catalog.list_with(|n| self.tracker.is_completed(n))
    }

    #[must_use]
    pub fn progress_summary(&self) -> ProgressSummary {
        self.tracker.summary()
    }

    /// Open a lesson: load it, remember it as current and start its exercises.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Catalog` if the lesson cannot be loaded; the
    /// previously open lesson (if any) stays open.
    pub fn select_lesson(&mut self, number: LessonNumber) -> Result<LessonOverview, StudyError> {
        let lesson = self.catalog.load(number)?;
        self.tracker.set_current(number);
        let overview = lesson.overview();
        self.open = Some(OpenLesson {
            session: ExerciseSession::new(&lesson),
            vocab: VocabPager::new(lesson.vocabulary().len()),
            lesson,
        });
        Ok(overview)
    }

    /// Reopen the lesson stored as current in progress.
    ///
    /// # Errors
    ///
    /// See [`select_lesson`](Self::select_lesson).
    pub fn resume(&mut self) -> Result<LessonOverview, StudyError> {
        self.select_lesson(self.tracker.current())
    }

    #[must_use]
    pub fn current_lesson(&self) -> Option<&Lesson> {
        self.open.as_ref().map(|open| open.lesson.as_ref())
    }

    /// Whether the open lesson has been completed before.
    #[must_use]
    pub fn current_lesson_completed(&self) -> bool {
        self.open
            .as_ref()
            .is_some_and(|open| self.tracker.is_completed(open.lesson.number()))
    }

    #[must_use]
    pub fn session(&self) -> Option<&ExerciseSession> {
        self.open.as_ref().map(|open| &open.session)
    }

    /// Mutable access for syllable building.
    pub fn session_mut(&mut self) -> Option<&mut ExerciseSession> {
        self.open.as_mut().map(|open| &mut open.session)
    }

    fn open_mut(&mut self) -> Result<&mut OpenLesson, StudyError> {
        self.open.as_mut().ok_or(StudyError::NoLessonSelected)
    }

    /// # Errors
    ///
    /// Returns `StudyError::NoLessonSelected` or the session's evaluation error.
    pub fn submit_answer(&mut self, answer: &Answer) -> Result<AnswerResult, StudyError> {
        Ok(self.open_mut()?.session.submit_answer(answer)?)
    }

    /// Move to the next exercise, recording completion after the last one.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::NoLessonSelected`, or `SessionError::Completed` if
    /// the exercises were already finished.
    pub fn advance_exercise(&mut self) -> Result<SessionStep, StudyError> {
        let step = self.open_mut()?.session.advance()?;
        if let SessionStep::Completed(lesson) = step {
            self.tracker.mark_completed(lesson);
        }
        Ok(step)
    }

    /// # Errors
    ///
    /// Returns `StudyError::NoLessonSelected`.
    pub fn restart_exercises(&mut self) -> Result<(), StudyError> {
        self.open_mut()?.session.restart();
        Ok(())
    }

    pub fn mark_current(&mut self, number: LessonNumber) {
        self.tracker.set_current(number);
    }

    /// The lesson after the last completed one, if it actually exists.
    #[must_use]
    pub fn next_lesson_offer(&self) -> Option<LessonNumber> {
        let next = self.tracker.next_lesson();
        self.catalog.info(next).map(|summary| summary.number)
    }

    #[must_use]
    pub fn vocab_pager(&self) -> Option<&VocabPager> {
        self.open.as_ref().map(|open| &open.vocab)
    }

    /// Vocabulary on the current page of the open lesson.
    #[must_use]
    pub fn vocab_page(&self) -> &[VocabEntry] {
        match &self.open {
            Some(open) => open.vocab.items(open.lesson.vocabulary()),
            None => &[],
        }
    }

    /// Returns `false` if there is no next page.
    pub fn next_vocab_page(&mut self) -> bool {
        self.open.as_mut().is_some_and(|open| open.vocab.next())
    }

    /// Returns `false` if there is no previous page.
    pub fn prev_vocab_page(&mut self) -> bool {
        self.open.as_mut().is_some_and(|open| open.vocab.prev())
    }

    pub fn vocabulary_review(&mut self) -> VocabularyReview {
        VocabularyReview::collect(&mut self.catalog, &self.tracker)
    }
}

impl std::fmt::Debug for StudyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudyService")
            .field("catalog", &self.catalog)
            .field("tracker", &self.tracker)
            .field("open_lesson", &self.open.as_ref().map(|o| o.lesson.number()))
            .finish()
    }
}
