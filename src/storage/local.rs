//! Local filesystem job store.
//!
//! Records live in a single pretty-printed JSON array. Every create rewrites
//! the file atomically (write to temp, then rename), so a crash mid-write
//! leaves the previous contents intact.
//!
//! Each create re-reads and rewrites the whole array and nothing trims it,
//! so writes slow down as the file grows. Meant for local runs, not for a
//! long-lived deployment.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::{AppError, Result};
use crate::models::JobRecord;
use crate::storage::JobStore;

/// JSON file storage backend.
pub struct LocalJobStore {
    path: PathBuf,
    // serializes read-modify-write of the file
    lock: Mutex<()>,
}

impl LocalJobStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored record, oldest first. A missing file is an empty store.
    pub async fn load_all(&self) -> Result<Vec<JobRecord>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl JobStore for LocalJobStore {
    async fn create_job(&self, record: &JobRecord) -> Result<()> {
        let _guard = self.lock.lock().await;

        let mut records = self
            .load_all()
            .await
            .map_err(|e| AppError::sink(&record.id, e))?;
        records.push(record.clone());

        let bytes = serde_json::to_vec_pretty(&records)?;
        self.write_bytes(&bytes)
            .await
            .map_err(|e| AppError::sink(&record.id, e))?;

        log::debug!(
            "Stored job {} in {} ({} total)",
            record.id,
            self.path.display(),
            records.len()
        );
        Ok(())
    }
}
