use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::ids::LessonNumber;

/// Persisted learner progress.
///
/// `completed_lessons` is a sorted set, so it serializes in ascending order
/// and never holds duplicates. `last_completed_lesson` only moves forward.
/// Missing keys fall back to their defaults when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressRecord {
    current_lesson: LessonNumber,
    completed_lessons: BTreeSet<LessonNumber>,
    last_completed_lesson: LessonNumber,
    total_lessons_available: usize,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            current_lesson: LessonNumber::new(1),
            completed_lessons: BTreeSet::new(),
            last_completed_lesson: LessonNumber::new(0),
            total_lessons_available: 0,
        }
    }
}

impl ProgressRecord {
    #[must_use]
    pub fn current_lesson(&self) -> LessonNumber {
        self.current_lesson
    }

    #[must_use]
    pub fn completed_lessons(&self) -> &BTreeSet<LessonNumber> {
        &self.completed_lessons
    }

    #[must_use]
    pub fn last_completed_lesson(&self) -> LessonNumber {
        self.last_completed_lesson
    }

    #[must_use]
    pub fn total_lessons_available(&self) -> usize {
        self.total_lessons_available
    }

    #[must_use]
    pub fn is_completed(&self, lesson: LessonNumber) -> bool {
        self.completed_lessons.contains(&lesson)
    }

    /// Always `last_completed_lesson + 1`; may name a lesson that does not exist.
    #[must_use]
    pub fn next_lesson(&self) -> LessonNumber {
        self.last_completed_lesson.next()
    }

    /// Record a completion. Returns `true` if anything changed.
    pub fn mark_completed(&mut self, lesson: LessonNumber) -> bool {
        let inserted = self.completed_lessons.insert(lesson);
        let advanced = lesson > self.last_completed_lesson;
        if advanced {
            self.last_completed_lesson = lesson;
        }
        inserted || advanced
    }

    /// Returns `true` if the current lesson changed.
    pub fn set_current_lesson(&mut self, lesson: LessonNumber) -> bool {
        let changed = self.current_lesson != lesson;
        self.current_lesson = lesson;
        changed
    }

    pub fn set_total_lessons_available(&mut self, total: usize) {
        self.total_lessons_available = total;
    }

    #[must_use]
    pub fn summary(&self) -> ProgressSummary {
        let total_lessons = self.total_lessons_available;
        let completed_count = self.completed_lessons.len();
        #[allow(clippy::cast_precision_loss)]
        let completion_percentage = if total_lessons == 0 {
            0.0
        } else {
            completed_count as f64 / total_lessons as f64 * 100.0
        };
        ProgressSummary {
            total_lessons,
            completed_count,
            completion_percentage,
            last_completed: self.last_completed_lesson,
            next_lesson: self.next_lesson(),
        }
    }
}

/// Read-only progress view for the lesson list header.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSummary {
    pub total_lessons: usize,
    pub completed_count: usize,
    pub completion_percentage: f64,
    pub last_completed: LessonNumber,
    pub next_lesson: LessonNumber,
}

impl ProgressSummary {
    /// `Progress: 1/3 lessons completed (33%)`
    #[must_use]
    pub fn headline(&self) -> String {
        format!(
            "Progress: {}/{} lessons completed ({:.0}%)",
            self.completed_count, self.total_lessons, self.completion_percentage
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(value: u32) -> LessonNumber {
        LessonNumber::new(value)
    }

    #[test]
    fn defaults() {
        let record = ProgressRecord::default();
        assert_eq!(record.current_lesson(), n(1));
        assert!(record.completed_lessons().is_empty());
        assert_eq!(record.last_completed_lesson(), n(0));
        assert_eq!(record.next_lesson(), n(1));
    }

    #[test]
    fn mark_completed_is_idempotent() {
        let mut once = ProgressRecord::default();
        assert!(once.mark_completed(n(2)));

        let mut twice = ProgressRecord::default();
        twice.mark_completed(n(2));
        assert!(!twice.mark_completed(n(2)));

        assert_eq!(once, twice);
    }

    #[test]
    fn last_completed_never_decreases() {
        let mut record = ProgressRecord::default();
        record.mark_completed(n(3));
        record.mark_completed(n(1));
        assert_eq!(record.last_completed_lesson(), n(3));
        assert_eq!(record.next_lesson(), n(4));
        let completed: Vec<_> = record.completed_lessons().iter().copied().collect();
        assert_eq!(completed, vec![n(1), n(3)]);
    }

    #[test]
    fn zero_total_gives_zero_percent() {
        let mut record = ProgressRecord::default();
        record.mark_completed(n(1));
        record.mark_completed(n(2));
        let summary = record.summary();
        assert_eq!(summary.total_lessons, 0);
        assert_eq!(summary.completed_count, 2);
        assert!(summary.completion_percentage.abs() < f64::EPSILON);
    }

    #[test]
    fn summary_scenario() {
        let mut record = ProgressRecord::default();
        record.set_total_lessons_available(3);
        record.mark_completed(n(1));

        let summary = record.summary();
        assert_eq!(summary.total_lessons, 3);
        assert_eq!(summary.completed_count, 1);
        assert!((summary.completion_percentage - 33.33).abs() < 0.01);
        assert_eq!(summary.last_completed, n(1));
        assert_eq!(summary.next_lesson, n(2));
        assert_eq!(summary.headline(), "Progress: 1/3 lessons completed (33%)");
    }

    #[test]
    fn missing_keys_use_defaults() {
        let record: ProgressRecord =
            serde_json::from_str(r#"{"completed_lessons": [2, 1, 2]}"#).unwrap();
        assert_eq!(record.current_lesson(), n(1));
        assert_eq!(record.completed_lessons().len(), 2);
        assert_eq!(record.last_completed_lesson(), n(0));
    }

    #[test]
    fn serializes_completed_lessons_sorted() {
        let mut record = ProgressRecord::default();
        record.mark_completed(n(5));
        record.mark_completed(n(2));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["completed_lessons"], serde_json::json!([2, 5]));
        assert_eq!(value["last_completed_lesson"], serde_json::json!(5));
        assert_eq!(value["current_lesson"], serde_json::json!(1));
        assert_eq!(value["total_lessons_available"], serde_json::json!(0));
    }
}
