use std::sync::Arc;

use job_core::{Job, SavedJobs, StorageError};

use super::KeyValueStore;

pub const SAVED_JOBS_KEY: &str = "savedJobs";

/// The saved-job list, held in memory and mirrored to one storage key.
///
/// Mutations write the whole list first and only then replace the in-memory
/// copy, so a failed write leaves both sides unchanged.
pub struct SavedJobStore {
    kv: Arc<dyn KeyValueStore>,
    key: String,
    current: SavedJobs,
}

impl SavedJobStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(kv, SAVED_JOBS_KEY)
    }

    pub fn with_key(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
            current: SavedJobs::new(),
        }
    }

    pub fn current(&self) -> &SavedJobs {
        &self.current
    }

    /// Reloads from storage. Missing or unreadable data yields an empty list.
    pub fn load(&mut self) -> &SavedJobs {
        self.current = match self.read() {
            Ok(list) => list,
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "saved jobs unreadable, starting empty");
                SavedJobs::new()
            }
        };
        &self.current
    }

    pub fn save(&mut self, list: SavedJobs) -> Result<(), StorageError> {
        self.write(&list)?;
        self.current = list;
        Ok(())
    }

    /// Returns `Ok(false)` without writing when a job with the same id exists.
    pub fn append_if_absent(&mut self, job: Job) -> Result<bool, StorageError> {
        let job_id = job.id.clone();
        let Some(next) = self.current.with_appended(job) else {
            tracing::debug!(job_id = %job_id, "job already saved");
            return Ok(false);
        };
        self.save(next)?;
        tracing::info!(job_id = %job_id, total = self.current.len(), "job saved");
        Ok(true)
    }

    pub fn remove(&mut self, id: &str) -> Result<(), StorageError> {
        if !self.current.contains(id) {
            return Ok(());
        }
        let next = self.current.without(id);
        self.save(next)?;
        tracing::info!(job_id = %id, total = self.current.len(), "saved job removed");
        Ok(())
    }

    fn read(&self) -> Result<SavedJobs, StorageError> {
        let raw = self
            .kv
            .get_item(&self.key)
            .map_err(|error| StorageError::Read(format!("{error:#}")))?;
        let Some(raw) = raw else {
            return Ok(SavedJobs::new());
        };
        let records: Vec<Job> = serde_json::from_str(&raw)
            .map_err(|error| StorageError::Read(error.to_string()))?;
        Ok(SavedJobs::from_records(records))
    }

    fn write(&self, list: &SavedJobs) -> Result<(), StorageError> {
        let serialized =
            serde_json::to_string(list).map_err(|error| StorageError::Write(error.to_string()))?;
        self.kv.set_item(&self.key, &serialized).map_err(|error| {
            tracing::error!(
                key = %self.key,
                error = %format!("{error:#}"),
                "failed to persist saved jobs"
            );
            StorageError::Write(format!("{error:#}"))
        })
    }
}
