//! Application configuration structures.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{Platform, Source};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Remote automation API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Recurring cycle settings
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Job Store settings
    #[serde(default)]
    pub sink: SinkConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Source registry, in processing order
    #[serde(default)]
    pub platforms: Vec<PlatformConfig>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::validation("api.base_url is empty"));
        }
        if self.api.api_key_env.trim().is_empty() {
            return Err(AppError::validation("api.api_key_env is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if self.api.poll_interval_secs == 0 {
            return Err(AppError::validation("api.poll_interval_secs must be > 0"));
        }
        if self.schedule.interval_secs == 0 {
            return Err(AppError::validation("schedule.interval_secs must be > 0"));
        }
        if self.platforms.is_empty() {
            return Err(AppError::validation("No platforms defined"));
        }

        let mut seen = HashSet::new();
        for platform in &self.platforms {
            if !seen.insert(platform.platform) {
                return Err(AppError::validation(format!(
                    "Platform {} is defined more than once",
                    platform.platform
                )));
            }
            platform.validate()?;
        }
        Ok(())
    }

    /// Registry entries that should run this cycle.
    pub fn enabled_platforms(&self) -> impl Iterator<Item = &PlatformConfig> {
        self.platforms.iter().filter(|p| p.enabled)
    }
}

/// Remote automation API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root, e.g. `https://api.apify.com/v2`
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Environment variable holding the bearer token
    #[serde(default = "defaults::api_key_env")]
    pub api_key_env: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between run status checks
    #[serde(default = "defaults::poll_interval")]
    pub poll_interval_secs: u64,
}

impl ApiConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            api_key_env: defaults::api_key_env(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            poll_interval_secs: defaults::poll_interval(),
        }
    }
}

/// Recurring cycle settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Time between cycle starts
    #[serde(default = "defaults::schedule_interval")]
    pub interval_secs: u64,

    /// Run a cycle immediately at startup
    #[serde(default = "defaults::enabled")]
    pub run_on_start: bool,
}

impl ScheduleConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_secs: defaults::schedule_interval(),
            run_on_start: defaults::enabled(),
        }
    }
}

/// Job Store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Value written to `JobRecord::source`
    #[serde(default = "defaults::source_label")]
    pub source_label: String,

    /// JSON file used by the local store
    #[serde(default = "defaults::store_path")]
    pub store_path: String,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            source_label: defaults::source_label(),
            store_path: defaults::store_path(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

/// One registry entry: a platform, the actor driving it and its sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub platform: Platform,

    /// Remote actor id (e.g. `apify~facebook-groups-scraper`)
    pub actor_id: String,

    #[serde(default = "defaults::enabled")]
    pub enabled: bool,

    /// Local wait deadline; falls back to the platform default
    #[serde(default)]
    pub run_timeout_secs: Option<u64>,

    #[serde(default = "defaults::max_posts")]
    pub max_posts: u32,

    /// Group platforms only
    #[serde(default)]
    pub max_comments: u32,

    /// Channel platforms only
    #[serde(default = "defaults::posts_from")]
    pub posts_from: u32,

    /// Channel platforms only
    #[serde(default = "defaults::posts_to")]
    pub posts_to: u32,

    /// Group URLs or channel names
    #[serde(default)]
    pub sources: Vec<String>,
}

impl PlatformConfig {
    pub fn run_timeout(&self) -> Duration {
        self.run_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| self.platform.default_run_timeout())
    }

    pub fn sources(&self) -> impl Iterator<Item = Source> + '_ {
        self.sources.iter().map(|identifier| Source {
            platform: self.platform,
            identifier: identifier.clone(),
        })
    }

    fn validate(&self) -> Result<()> {
        if self.actor_id.trim().is_empty() {
            return Err(AppError::validation(format!(
                "{}: actor_id is empty",
                self.platform
            )));
        }
        if self.enabled && self.sources.is_empty() {
            return Err(AppError::validation(format!(
                "{}: no sources defined",
                self.platform
            )));
        }
        if self.run_timeout_secs == Some(0) {
            return Err(AppError::validation(format!(
                "{}: run_timeout_secs must be > 0",
                self.platform
            )));
        }
        if self.posts_from > self.posts_to {
            return Err(AppError::validation(format!(
                "{}: posts_from ({}) is after posts_to ({})",
                self.platform, self.posts_from, self.posts_to
            )));
        }
        Ok(())
    }
}

mod defaults {
    // API defaults
    pub fn base_url() -> String {
        "https://api.apify.com/v2".into()
    }
    pub fn api_key_env() -> String {
        "APIFY_API_KEY".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; crew-scraper/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn poll_interval() -> u64 {
        10
    }

    // Schedule defaults
    pub fn schedule_interval() -> u64 {
        6 * 60 * 60
    }
    pub fn enabled() -> bool {
        true
    }

    // Sink defaults
    pub fn source_label() -> String {
        "Yacht Scraper".into()
    }
    pub fn store_path() -> String {
        "data/jobs.json".into()
    }

    pub fn log_level() -> String {
        "info".into()
    }

    // Registry defaults
    pub fn max_posts() -> u32 {
        20
    }
    pub fn posts_from() -> u32 {
        1
    }
    pub fn posts_to() -> u32 {
        20
    }
}
