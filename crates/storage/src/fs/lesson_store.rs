use std::fs;

use lesson_core::model::{Lesson, LessonNumber, LessonSummary};

use super::JsonLessonStore;
use super::naming::parse_lesson_file_name;
use crate::repository::{LessonRepository, StorageError};

impl LessonRepository for JsonLessonStore {
    fn list_lessons(&self) -> Result<Vec<LessonSummary>, StorageError> {
        if !self.dir().exists() {
            tracing::info!(dir = %self.dir().display(), "lessons directory not found, creating it");
            fs::create_dir_all(self.dir())?;
            return Ok(Vec::new());
        }

        let mut summaries = Vec::new();
        for entry in fs::read_dir(self.dir())? {
            let entry = entry?;
            let Some(number) = entry.file_name().to_str().and_then(parse_lesson_file_name) else {
                continue;
            };
            // Full parse: a lesson is only listed if it also loads.
            match self.get_lesson(number) {
                Ok(lesson) => summaries.push(lesson.summary()),
                Err(err) => {
                    tracing::warn!(
                        path = %entry.path().display(),
                        "skipping unreadable lesson file: {err}"
                    );
                }
            }
        }

        summaries.sort_by_key(|summary| summary.number);
        Ok(summaries)
    }

    fn get_lesson(&self, number: LessonNumber) -> Result<Lesson, StorageError> {
        let raw = fs::read_to_string(self.lesson_path(number))?;
        let lesson: Lesson = serde_json::from_str(&raw)?;
        if lesson.number() != number {
            return Err(StorageError::Parse(format!(
                "lesson_number {} does not match file name",
                lesson.number()
            )));
        }
        Ok(lesson)
    }
}
