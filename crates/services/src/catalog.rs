use std::collections::HashMap;
use std::sync::Arc;

use lesson_core::model::{Lesson, LessonNumber, LessonSummary};
use storage::LessonRepository;

use crate::error::CatalogError;

/// Lesson list entry joined with completion state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonListItem {
    pub summary: LessonSummary,
    pub completed: bool,
}

/// Index of available lessons plus a cache of the ones already loaded.
///
/// Summaries come from the last [`scan`](Self::scan); full lessons are parsed
/// on first [`load`](Self::load) and kept until the next scan.
pub struct LessonCatalog {
    repo: Arc<dyn LessonRepository>,
    summaries: Vec<LessonSummary>,
    loaded: HashMap<LessonNumber, Arc<Lesson>>,
}

impl LessonCatalog {
    /// Create an empty catalog. Call [`scan`](Self::scan) to populate it.
    #[must_use]
    pub fn new(repo: Arc<dyn LessonRepository>) -> Self {
        Self {
            repo,
            summaries: Vec::new(),
            loaded: HashMap::new(),
        }
    }

    /// Re-read the lesson index. A failed listing leaves the catalog empty.
    pub fn scan(&mut self) -> &[LessonSummary] {
        self.loaded.clear();
        self.summaries = match self.repo.list_lessons() {
            Ok(summaries) => summaries,
            Err(err) => {
                tracing::warn!("failed to scan lessons: {err}");
                Vec::new()
            }
        };
        tracing::debug!(count = self.summaries.len(), "lesson scan complete");
        &self.summaries
    }

    #[must_use]
    pub fn summaries(&self) -> &[LessonSummary] {
        &self.summaries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// Summary for `number` from the last scan, without touching storage.
    #[must_use]
    pub fn info(&self, number: LessonNumber) -> Option<&LessonSummary> {
        self.summaries.iter().find(|summary| summary.number == number)
    }

    /// Load the full lesson.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the lesson has no file,
    /// `CatalogError::Parse` if it is malformed, or `CatalogError::Io`.
    pub fn load(&mut self, number: LessonNumber) -> Result<Arc<Lesson>, CatalogError> {
        if let Some(lesson) = self.loaded.get(&number) {
            return Ok(Arc::clone(lesson));
        }
        let lesson = self.repo.get_lesson(number).map_err(|err| {
            let err = CatalogError::from_storage(number, err);
            tracing::warn!("error loading lesson {number}: {err}");
            err
        })?;
        let lesson = Arc::new(lesson);
        self.loaded.insert(number, Arc::clone(&lesson));
        Ok(lesson)
    }

    /// Listing for a lesson-selection view.
    pub fn list_with(&self, is_completed: impl Fn(LessonNumber) -> bool) -> Vec<LessonListItem> {
        self.summaries
            .iter()
            .map(|summary| LessonListItem {
                summary: summary.clone(),
                completed: is_completed(summary.number),
            })
            .collect()
    }
}

impl std::fmt::Debug for LessonCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LessonCatalog")
            .field("summaries", &self.summaries)
            .field("loaded_len", &self.loaded.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::InMemoryRepository;

    fn build_lesson(number: u32, title: &str) -> Lesson {
        Lesson::new(
            LessonNumber::new(number),
            title,
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        )
        .unwrap()
    }

    fn catalog() -> LessonCatalog {
        let repo = InMemoryRepository::with_lessons([
            build_lesson(2, "Numbers"),
            build_lesson(1, "Greetings"),
        ]);
        let mut catalog = LessonCatalog::new(Arc::new(repo));
        catalog.scan();
        catalog
    }

    #[test]
    fn info_uses_scanned_summaries() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.info(LessonNumber::new(2)).unwrap().title, "Numbers");
        assert!(catalog.info(LessonNumber::new(3)).is_none());
    }

    #[test]
    fn every_scanned_lesson_loads() {
        let mut catalog = catalog();
        let numbers: Vec<_> = catalog.summaries().iter().map(|s| s.number).collect();
        for number in numbers {
            assert_eq!(catalog.load(number).unwrap().number(), number);
        }
    }

    #[test]
    fn load_caches_lessons() {
        let mut catalog = catalog();
        let first = catalog.load(LessonNumber::new(1)).unwrap();
        let second = catalog.load(LessonNumber::new(1)).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn missing_lesson_is_reported() {
        let mut catalog = catalog();
        let err = catalog.load(LessonNumber::new(9)).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(n) if n == LessonNumber::new(9)));
    }

    #[test]
    fn list_marks_completion() {
        let catalog = catalog();
        let items = catalog.list_with(|n| n == LessonNumber::new(1));
        assert!(items[0].completed);
        assert!(!items[1].completed);
    }
}
