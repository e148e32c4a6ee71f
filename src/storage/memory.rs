//! In-memory job store.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::JobRecord;
use crate::storage::JobStore;

/// Keeps records in process memory; nothing survives the run.
#[derive(Default)]
pub struct MemoryJobStore {
    records: Mutex<Vec<JobRecord>>,
    rejected_titles: HashSet<String>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects records carrying any of `titles`.
    #[cfg(test)]
    pub fn failing_on(titles: &[&str]) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            rejected_titles: titles.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Snapshot of the stored records, in insertion order.
    pub fn records(&self) -> Vec<JobRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn create_job(&self, record: &JobRecord) -> Result<()> {
        if self.rejected_titles.contains(&record.title) {
            return Err(AppError::sink(&record.id, "store rejected the record"));
        }

        self.records
            .lock()
            .map_err(|_| AppError::sink(&record.id, "store lock poisoned"))?
            .push(record.clone());
        Ok(())
    }
}
