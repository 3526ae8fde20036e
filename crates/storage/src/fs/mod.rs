//! JSON-file backends: one file per lesson, one file for progress.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::repository::{LessonRepository, ProgressRepository, Storage};

mod atomic;
mod lesson_store;
mod naming;
mod progress_store;

pub use naming::{lesson_file_name, parse_lesson_file_name};

/// Default directory scanned for lesson files.
pub const DEFAULT_LESSONS_DIR: &str = "lessons";
/// Default location of the progress file.
pub const DEFAULT_PROGRESS_FILE: &str = "progress.json";

/// Lessons stored as `lesson_NN.json` files in one directory.
#[derive(Debug, Clone)]
pub struct JsonLessonStore {
    dir: PathBuf,
}

impl JsonLessonStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the file that holds `number`.
    #[must_use]
    pub fn lesson_path(&self, number: lesson_core::model::LessonNumber) -> PathBuf {
        self.dir.join(lesson_file_name(number))
    }
}

/// Progress record kept in a single pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonProgressStore {
    path: PathBuf,
}

impl JsonProgressStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage {
    /// Build a `Storage` backed by lesson files in `lessons_dir` and progress
    /// in `progress_file`. Nothing is touched on disk until first use.
    #[must_use]
    pub fn json_files(lessons_dir: impl Into<PathBuf>, progress_file: impl Into<PathBuf>) -> Self {
        let lessons: Arc<dyn LessonRepository> = Arc::new(JsonLessonStore::new(lessons_dir));
        let progress: Arc<dyn ProgressRepository> = Arc::new(JsonProgressStore::new(progress_file));
        Self { lessons, progress }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JsonLessonStore>();
        assert_send_sync::<JsonProgressStore>();
    }

    #[test]
    fn lesson_path_uses_two_digit_names() {
        let store = JsonLessonStore::new("lessons");
        let path = store.lesson_path(lesson_core::model::LessonNumber::new(4));
        assert_eq!(path, Path::new("lessons").join("lesson_04.json"));
    }
}
