// src/services/fetcher.rs

//! Result fetcher.
//!
//! Reads the whole dataset of a finished run in one call. No pagination and
//! no deduplication against earlier cycles.

use std::sync::Arc;

use crate::error::Result;
use crate::models::{RawPost, RunHandle};
use crate::services::AutomationApi;

pub struct ResultFetcher {
    api: Arc<dyn AutomationApi>,
}

impl ResultFetcher {
    pub fn new(api: Arc<dyn AutomationApi>) -> Self {
        Self { api }
    }

    /// Fetch the posts of a completed run, tagged with the run's platform.
    pub async fn fetch(&self, handle: &RunHandle) -> Result<Vec<RawPost>> {
        let mut posts = self.api.dataset_items(&handle.id).await?;
        for post in &mut posts {
            post.platform = Some(handle.platform);
        }

        log::info!(
            "Retrieved {} posts from {} run {}",
            posts.len(),
            handle.platform,
            handle.id
        );
        Ok(posts)
    }
}
