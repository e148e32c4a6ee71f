//! Job persistence.
//!
//! The pipeline only ever creates records; it never reads them back or
//! deduplicates them. Two backends exist:
//!
//! - `LocalJobStore`: a JSON array file on disk
//! - `MemoryJobStore`: an in-process list, used for dry runs

pub mod local;
pub mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::JobRecord;

pub use local::LocalJobStore;
pub use memory::MemoryJobStore;

/// Trait for job storage backends.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Persist a new record.
    async fn create_job(&self, record: &JobRecord) -> Result<()>;
}
