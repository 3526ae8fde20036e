#![forbid(unsafe_code)]

pub mod fs;
pub mod repository;

pub use repository::{
    InMemoryRepository, LessonRepository, ProgressRepository, Storage, StorageError,
};
