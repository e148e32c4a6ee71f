// src/services/sink.rs

//! Job sink.
//!
//! Turns extracted jobs into records and hands them to the Job Store one at a
//! time. A rejected record is reported to the caller and lost for the cycle.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{ExtractedJob, JobRecord};
use crate::services::Clock;
use crate::storage::JobStore;

pub struct JobSink {
    store: Arc<dyn JobStore>,
    clock: Arc<dyn Clock>,
    source_label: String,
}

impl JobSink {
    pub fn new(store: Arc<dyn JobStore>, clock: Arc<dyn Clock>, source_label: &str) -> Self {
        Self {
            store,
            clock,
            source_label: source_label.to_string(),
        }
    }

    /// Persist one job under a fresh id and return that id.
    pub async fn sink(&self, job: ExtractedJob) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let record = JobRecord::new(id.clone(), job, &self.source_label, self.clock.now());

        match self.store.create_job(&record).await {
            Ok(()) => {
                log::debug!("Saved job {} ({})", record.id, record.title);
                Ok(id)
            }
            Err(e @ AppError::Sink { .. }) => Err(e),
            Err(e) => Err(AppError::sink(id, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{ManualClock, job};
    use crate::storage::MemoryJobStore;

    #[tokio::test]
    async fn test_sink_stamps_record() {
        let store = Arc::new(MemoryJobStore::new());
        let clock = Arc::new(ManualClock::at_epoch());
        let sink = JobSink::new(store.clone(), clock.clone(), "Yacht Scraper");

        let id = sink.sink(job("Deckhand")).await.unwrap();

        let records = store.records();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id, id);
        assert_eq!(record.title, "Deckhand");
        assert_eq!(record.source, "Yacht Scraper");
        assert_eq!(record.scraped_at, clock.now());
        assert_eq!(record.posted_at, clock.now());
    }

    #[tokio::test]
    async fn test_sink_assigns_unique_ids() {
        let store = Arc::new(MemoryJobStore::new());
        let sink = JobSink::new(store.clone(), Arc::new(ManualClock::at_epoch()), "Yacht Scraper");

        let first = sink.sink(job("Chef")).await.unwrap();
        let second = sink.sink(job("Chef")).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(store.records().len(), 2);
    }

    #[tokio::test]
    async fn test_store_failure_is_sink_error() {
        let store = Arc::new(MemoryJobStore::failing_on(&["Bosun"]));
        let sink = JobSink::new(store.clone(), Arc::new(ManualClock::at_epoch()), "Yacht Scraper");

        let err = sink.sink(job("Bosun")).await.unwrap_err();
        assert!(matches!(err, AppError::Sink { .. }));
        assert!(store.records().is_empty());
    }
}
