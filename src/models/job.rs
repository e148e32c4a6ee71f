//! Extracted jobs and the records handed to the Job Store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Structured attributes derived from a post's text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractedJob {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub vessel_type: String,
    pub duration: String,
    pub salary: String,

    /// Trimmed, length-limited post text
    pub description: String,

    pub source_url: String,

    /// Publication time carried over from the post
    pub posted_at: Option<DateTime<Utc>>,
}

/// A job as persisted by the Job Store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobRecord {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: String,
    #[serde(rename = "vessel")]
    pub vessel_type: String,
    pub duration: String,
    pub salary: String,
    pub description: String,
    /// Not derived from posts; kept for the store schema
    #[serde(default)]
    pub requirements: String,
    pub source_url: String,
    /// Label of the ingestion channel (e.g. "Yacht Scraper")
    pub source: String,
    pub posted_at: DateTime<Utc>,
    pub scraped_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobRecord {
    /// Stamp an extracted job for persistence.
    ///
    /// `posted_at` falls back to `now` when the post carried no timestamp.
    pub fn new(id: String, job: ExtractedJob, source: &str, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: job.title,
            company: job.company,
            location: job.location,
            job_type: job.job_type,
            vessel_type: job.vessel_type,
            duration: job.duration,
            salary: job.salary,
            description: job.description,
            requirements: String::new(),
            source_url: job.source_url,
            source: source.to_string(),
            posted_at: job.posted_at.unwrap_or(now),
            scraped_at: now,
            created_at: now,
            updated_at: now,
        }
    }
}
