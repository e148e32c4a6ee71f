// src/services/launcher.rs

//! Actor launcher.
//!
//! Builds a platform's run request from its registry entry and submits it.
//! There is no retry here; a failed launch drops that platform for the cycle.

use std::sync::Arc;

use crate::error::Result;
use crate::models::{PlatformConfig, RunHandle, RunRequest};
use crate::services::{AutomationApi, Clock};

pub struct ActorLauncher {
    api: Arc<dyn AutomationApi>,
    clock: Arc<dyn Clock>,
}

impl ActorLauncher {
    pub fn new(api: Arc<dyn AutomationApi>, clock: Arc<dyn Clock>) -> Self {
        Self { api, clock }
    }

    /// Start a run for one registry entry.
    pub async fn launch(&self, config: &PlatformConfig) -> Result<RunHandle> {
        let request = RunRequest::for_platform(config, self.clock.now().date_naive());

        log::info!(
            "Launching actor {} for {} ({} sources)",
            config.actor_id,
            config.platform,
            request.source_count()
        );

        let id = self
            .api
            .start_run(config.platform, &config.actor_id, &request)
            .await?;
        let handle = RunHandle {
            id,
            platform: config.platform,
            started_at: self.clock.now(),
            timeout: config.run_timeout(),
        };

        log::info!(
            "Actor run {} started for {} (deadline {}s)",
            handle.id,
            handle.platform,
            handle.timeout.as_secs()
        );
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::Platform;
    use crate::services::testing::{FakeApi, ManualClock};
    use std::time::Duration;

    fn group_config() -> PlatformConfig {
        PlatformConfig {
            platform: Platform::FacebookGroups,
            actor_id: "group-actor".to_string(),
            enabled: true,
            run_timeout_secs: None,
            max_posts: 20,
            max_comments: 0,
            posts_from: 1,
            posts_to: 20,
            sources: vec!["https://www.facebook.com/groups/crewhq/".to_string()],
        }
    }

    #[tokio::test]
    async fn test_launch_returns_handle() {
        let api = Arc::new(FakeApi::new());
        api.push_run_id("run-1");
        let clock = Arc::new(ManualClock::at_epoch());
        let launcher = ActorLauncher::new(api.clone(), clock.clone());

        let handle = launcher.launch(&group_config()).await.unwrap();

        assert_eq!(handle.id, "run-1");
        assert_eq!(handle.platform, Platform::FacebookGroups);
        assert_eq!(handle.started_at, clock.now());
        assert_eq!(handle.timeout, Duration::from_secs(600));

        let launched = api.launched();
        assert_eq!(launched.len(), 1);
        assert_eq!(launched[0].0, "group-actor");
        assert!(matches!(launched[0].1, RunRequest::Groups(_)));
    }

    #[tokio::test]
    async fn test_launch_failure_propagates() {
        let api = Arc::new(FakeApi::new());
        let clock = Arc::new(ManualClock::at_epoch());
        let launcher = ActorLauncher::new(api, clock);

        let err = launcher.launch(&group_config()).await.unwrap_err();
        assert!(matches!(err, AppError::Launch { .. }));
    }
}
