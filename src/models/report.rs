//! Cycle statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::Platform;

/// What one platform contributed to a cycle.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformOutcome {
    pub platform: Platform,
    pub run_id: Option<String>,
    pub posts: usize,
    /// Set when launch, wait or fetch failed
    pub error: Option<String>,
}

impl PlatformOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Summary of a full cycle.
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// True when scraping is disabled and nothing was attempted
    pub skipped: bool,
    pub platforms: Vec<PlatformOutcome>,
    pub posts: usize,
    pub job_posts: usize,
    pub saved: usize,
    pub sink_failures: usize,
}

impl CycleReport {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            finished_at: started_at,
            skipped: false,
            platforms: Vec::new(),
            posts: 0,
            job_posts: 0,
            saved: 0,
            sink_failures: 0,
        }
    }

    pub fn failed_platforms(&self) -> usize {
        self.platforms.iter().filter(|p| !p.succeeded()).count()
    }
}
