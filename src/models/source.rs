// src/models/source.rs

//! Platforms and the community sources scraped on them.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A social platform driven by one remote actor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    /// Facebook groups, addressed by group URL
    FacebookGroups,
    /// Public Telegram channels, addressed by channel name
    TelegramChannels,
}

impl Platform {
    /// Local deadline for a run when the registry does not set one.
    pub fn default_run_timeout(&self) -> Duration {
        match self {
            Platform::FacebookGroups => Duration::from_secs(10 * 60),
            Platform::TelegramChannels => Duration::from_secs(15 * 60),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::FacebookGroups => "facebook-groups",
            Platform::TelegramChannels => "telegram-channels",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single group or channel on a platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub platform: Platform,

    /// Group URL or channel name
    pub identifier: String,
}
