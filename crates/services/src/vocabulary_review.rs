use std::collections::BTreeSet;

use lesson_core::model::{LessonNumber, VocabEntry};

use crate::catalog::LessonCatalog;
use crate::progress_tracker::ProgressTracker;

/// Vocabulary of one lesson in the review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonVocabulary {
    pub lesson: LessonNumber,
    /// `Lesson 2: Numbers`
    pub heading: String,
    pub words: Vec<VocabEntry>,
}

/// A word in the flattened "all words" view, tagged with its lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewWord {
    pub entry: VocabEntry,
    pub lesson_heading: String,
}

/// Words the learner has met: every completed lesson plus the current one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabularyReview {
    groups: Vec<LessonVocabulary>,
}

impl VocabularyReview {
    /// Gather vocabulary for completed lessons and the current lesson.
    ///
    /// Lessons that fail to load or have no vocabulary are left out.
    pub fn collect(catalog: &mut LessonCatalog, tracker: &ProgressTracker) -> Self {
        let mut lessons: BTreeSet<LessonNumber> =
            tracker.record().completed_lessons().iter().copied().collect();
        lessons.insert(tracker.current());

        let groups = lessons
            .into_iter()
            .filter_map(|number| catalog.load(number).ok())
            .filter(|lesson| !lesson.vocabulary().is_empty())
            .map(|lesson| LessonVocabulary {
                lesson: lesson.number(),
                heading: lesson.heading(),
                words: lesson.vocabulary().to_vec(),
            })
            .collect();

        Self { groups }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in ascending lesson order.
    #[must_use]
    pub fn by_lesson(&self) -> &[LessonVocabulary] {
        &self.groups
    }

    /// Every word, sorted by its Korean spelling.
    #[must_use]
    pub fn all_words(&self) -> Vec<ReviewWord> {
        let mut words: Vec<ReviewWord> = self
            .groups
            .iter()
            .flat_map(|group| {
                group.words.iter().map(|entry| ReviewWord {
                    entry: entry.clone(),
                    lesson_heading: group.heading.clone(),
                })
            })
            .collect();
        words.sort_by(|a, b| a.entry.korean.cmp(&b.entry.korean));
        words
    }

    #[must_use]
    pub fn total_words(&self) -> usize {
        self.groups.iter().map(|group| group.words.len()).sum()
    }

    #[must_use]
    pub fn lesson_count(&self) -> usize {
        self.groups.len()
    }

    /// `Total: 12 words from 3 lessons`
    #[must_use]
    pub fn stats_line(&self) -> String {
        format!(
            "Total: {} words from {} lessons",
            self.total_words(),
            self.lesson_count()
        )
    }
}
