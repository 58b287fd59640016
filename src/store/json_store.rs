use crate::common::Submission;
use crate::error::StoreError;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::warn;

/// The persisted record store: supplies the full submission history to
/// the analysis run and accepts one appended record per respondent.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn load(&self) -> Result<Vec<Submission>, StoreError>;

    /// Appends one record and returns the new total.
    async fn append(&self, submission: Submission) -> Result<usize, StoreError>;
}

/// Flat-file store: one JSON array of records, rewritten whole on every
/// append. Appends are serialized behind a lock so concurrent
/// submissions cannot interleave the read-modify-write cycle.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_records(&self) -> Result<Vec<Submission>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Read(self.path.clone(), e)),
        };
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt(self.path.clone(), e))
    }
}

#[async_trait]
impl SubmissionStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<Submission>, StoreError> {
        self.read_records().await
    }

    async fn append(&self, submission: Submission) -> Result<usize, StoreError> {
        let _guard = self.write_lock.lock().await;
        // An unreadable file degrades to an empty history on append, so
        // intake keeps accepting even when the store was hand-edited.
        let mut records = match self.read_records().await {
            Ok(records) => records,
            Err(e) => {
                warn!("Starting a fresh record file: {}", e);
                Vec::new()
            }
        };
        records.push(submission);
        let bytes = serde_json::to_vec_pretty(&records).map_err(StoreError::Serialize)?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| StoreError::Write(self.path.clone(), e))?;
        Ok(records.len())
    }
}
