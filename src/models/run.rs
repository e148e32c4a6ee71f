// src/models/run.rs

//! Actor run requests, handles and remote run states.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::models::{Platform, PlatformConfig};

/// Entry of the `startUrls` list accepted by group scrapers.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StartUrl {
    pub url: String,
}

/// Input for group-based actors.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroupRunRequest {
    pub start_urls: Vec<StartUrl>,
    pub max_posts: u32,
    /// Serialized as `YYYY-MM-DD`
    pub max_post_date: NaiveDate,
    pub max_comments: u32,
}

/// Input for channel-based actors.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChannelRunRequest {
    pub channels: Vec<String>,
    pub posts_from: u32,
    pub posts_to: u32,
    pub max_posts: u32,
    /// Remote run timeout in seconds
    pub timeout: u64,
}

/// Platform-specific body of a `POST /acts/{actor}/runs` call.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RunRequest {
    Groups(GroupRunRequest),
    Channels(ChannelRunRequest),
}

impl RunRequest {
    /// Build the request for one registry entry.
    ///
    /// `today` becomes the `maxPostDate` of group requests.
    pub fn for_platform(config: &PlatformConfig, today: NaiveDate) -> Self {
        match config.platform {
            Platform::FacebookGroups => RunRequest::Groups(GroupRunRequest {
                start_urls: config
                    .sources()
                    .map(|source| StartUrl {
                        url: source.identifier,
                    })
                    .collect(),
                max_posts: config.max_posts,
                max_post_date: today,
                max_comments: config.max_comments,
            }),
            Platform::TelegramChannels => RunRequest::Channels(ChannelRunRequest {
                channels: config.sources().map(|source| source.identifier).collect(),
                posts_from: config.posts_from,
                posts_to: config.posts_to,
                max_posts: config.max_posts,
                timeout: config.run_timeout().as_secs(),
            }),
        }
    }

    /// Number of groups or channels addressed by the request.
    pub fn source_count(&self) -> usize {
        match self {
            RunRequest::Groups(r) => r.start_urls.len(),
            RunRequest::Channels(r) => r.channels.len(),
        }
    }
}

/// Local reference to a launched remote run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunHandle {
    /// Opaque remote run id
    pub id: String,
    pub platform: Platform,
    pub started_at: DateTime<Utc>,
    /// Local deadline measured from `started_at`
    pub timeout: Duration,
}

/// Status reported by `GET /actor-runs/{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// Any non-terminal state (`READY`, `RUNNING`, ...)
    Pending(String),
    Succeeded,
    Failed,
    Aborted,
    TimedOut,
}

impl RunStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "SUCCEEDED" => RunStatus::Succeeded,
            "FAILED" => RunStatus::Failed,
            "ABORTED" => RunStatus::Aborted,
            "TIMED-OUT" | "TIMED_OUT" => RunStatus::TimedOut,
            _ => RunStatus::Pending(raw.to_string()),
        }
    }

    /// Whether the remote run can no longer change state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunStatus::Pending(_))
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Pending(raw) => f.write_str(raw),
            RunStatus::Succeeded => f.write_str("SUCCEEDED"),
            RunStatus::Failed => f.write_str("FAILED"),
            RunStatus::Aborted => f.write_str("ABORTED"),
            RunStatus::TimedOut => f.write_str("TIMED-OUT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel_config() -> PlatformConfig {
        PlatformConfig {
            platform: Platform::TelegramChannels,
            actor_id: "channel-actor".to_string(),
            enabled: true,
            run_timeout_secs: None,
            max_posts: 20,
            max_comments: 0,
            posts_from: 1,
            posts_to: 20,
            sources: vec!["cvcrewcom".to_string()],
        }
    }

    #[test]
    fn test_channel_request_serializes_default_timeout() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let request = RunRequest::for_platform(&channel_config(), today);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "channels": ["cvcrewcom"],
                "postsFrom": 1,
                "postsTo": 20,
                "maxPosts": 20,
                "timeout": 900
            })
        );
    }

    #[test]
    fn test_group_request_layout() {
        let config = PlatformConfig {
            platform: Platform::FacebookGroups,
            actor_id: "group-actor".to_string(),
            sources: vec!["https://www.facebook.com/groups/crewhq/".to_string()],
            ..channel_config()
        };
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let request = RunRequest::for_platform(&config, today);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "startUrls": [{ "url": "https://www.facebook.com/groups/crewhq/" }],
                "maxPosts": 20,
                "maxPostDate": "2025-06-01",
                "maxComments": 0
            })
        );
        assert_eq!(request.source_count(), 1);
    }

    #[test]
    fn test_run_status_parse() {
        assert_eq!(RunStatus::parse("SUCCEEDED"), RunStatus::Succeeded);
        assert_eq!(RunStatus::parse("TIMED-OUT"), RunStatus::TimedOut);
        assert_eq!(RunStatus::parse("TIMED_OUT"), RunStatus::TimedOut);
        assert_eq!(
            RunStatus::parse("RUNNING"),
            RunStatus::Pending("RUNNING".to_string())
        );
        assert!(!RunStatus::parse("READY").is_terminal());
        assert!(RunStatus::Aborted.is_terminal());
        assert!(RunStatus::Succeeded.is_terminal());
    }
}
