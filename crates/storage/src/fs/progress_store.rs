use std::fs;

use lesson_core::model::ProgressRecord;

use super::JsonProgressStore;
use super::atomic::atomic_write;
use crate::repository::{ProgressRepository, StorageError};

impl ProgressRepository for JsonProgressStore {
    fn load_progress(&self) -> Result<Option<ProgressRecord>, StorageError> {
        let raw = match fs::read_to_string(self.path()) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let record = serde_json::from_str(&raw)?;
        Ok(Some(record))
    }

    fn save_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        if let Some(parent) = self.path().parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(record)?;
        atomic_write(self.path(), &bytes)?;
        tracing::debug!(path = %self.path().display(), "progress saved");
        Ok(())
    }
}
