// src/models/mod.rs

//! Domain models for the scraper.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod job;
mod post;
mod report;
mod run;
mod source;

// Re-export all public types
pub use config::{ApiConfig, Config, LoggingConfig, PlatformConfig, ScheduleConfig, SinkConfig};
pub use job::{ExtractedJob, JobRecord};
pub use post::RawPost;
pub use report::{CycleReport, PlatformOutcome};
pub use run::{ChannelRunRequest, GroupRunRequest, RunHandle, RunRequest, RunStatus, StartUrl};
pub use source::{Platform, Source};
