// src/error.rs

//! Unified error handling for the scraper.

use std::fmt;

use thiserror::Error;

use crate::models::{Platform, RunStatus};

/// Result type alias for scraper operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Actor run could not be started
    #[error("Launch error for {platform}: {message}")]
    Launch { platform: String, message: String },

    /// Transport failure while checking run status
    #[error("Poll error for run {run_id}: {message}")]
    Poll { run_id: String, message: String },

    /// Remote run reached a terminal failure state
    #[error("Actor run {run_id} finished with status {status}")]
    RunFailed { run_id: String, status: RunStatus },

    /// Local deadline exceeded before the run finished
    #[error("Timed out waiting for actor run {run_id} after {elapsed_secs}s")]
    RunTimeout { run_id: String, elapsed_secs: i64 },

    /// Malformed JSON at the API boundary
    #[error("Decode error in {context}: {message}")]
    Decode { context: String, message: String },

    /// Job Store rejected a record
    #[error("Sink error for job {job_id}: {message}")]
    Sink { job_id: String, message: String },

    /// Shutdown observed while waiting on a run
    #[error("Cancelled while waiting for actor run {0}")]
    Cancelled(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a launch error for a platform.
    pub fn launch(platform: Platform, message: impl fmt::Display) -> Self {
        Self::Launch {
            platform: platform.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a poll error for a run.
    pub fn poll(run_id: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Poll {
            run_id: run_id.into(),
            message: message.to_string(),
        }
    }

    /// Create a decode error with context.
    pub fn decode(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Decode {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a sink error for a record.
    pub fn sink(job_id: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Sink {
            job_id: job_id.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
