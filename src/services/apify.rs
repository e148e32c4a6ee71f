// src/services/apify.rs

//! Remote automation API client.
//!
//! Three calls are used: start an actor run, read a run's status and read the
//! items of a finished run's default dataset. All of them authenticate with a
//! bearer token.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{ApiConfig, Platform, RawPost, RunRequest, RunStatus};
use crate::utils::http::{create_async_client, error_body};

/// Characters of a failed response body kept in error messages.
const ERROR_BODY_LIMIT: usize = 200;

/// Operations the pipeline needs from the automation platform.
#[async_trait]
pub trait AutomationApi: Send + Sync {
    /// Submit a run and return its remote id.
    async fn start_run(
        &self,
        platform: Platform,
        actor_id: &str,
        request: &RunRequest,
    ) -> Result<String>;

    /// Current status of a run.
    async fn run_status(&self, run_id: &str) -> Result<RunStatus>;

    /// Every item of a run's dataset, in dataset order.
    async fn dataset_items(&self, run_id: &str) -> Result<Vec<RawPost>>;
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct RunCreated {
    id: String,
}

#[derive(Debug, Deserialize)]
struct RunState {
    status: String,
}

/// HTTP implementation of [`AutomationApi`].
pub struct ApifyClient {
    client: Client,
    base_url: Url,
    token: String,
}

impl ApifyClient {
    /// Create a client for the API described by `config`.
    pub fn new(config: &ApiConfig, token: impl Into<String>) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::config(format!(
                "api.base_url is not a base URL: {}",
                config.base_url
            )));
        }

        Ok(Self {
            client: create_async_client(config)?,
            base_url,
            token: token.into(),
        })
    }

    /// Append path segments to the API root.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::config("api.base_url is not a base URL"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl AutomationApi for ApifyClient {
    async fn start_run(
        &self,
        platform: Platform,
        actor_id: &str,
        request: &RunRequest,
    ) -> Result<String> {
        let url = self.endpoint(&["acts", actor_id, "runs"])?;
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::launch(platform, e))?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let body = error_body(response, ERROR_BODY_LIMIT).await;
            return Err(AppError::launch(
                platform,
                format!("failed to start actor {actor_id}: HTTP {status} {body}"),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::launch(platform, e))?;
        let created: ApiResponse<RunCreated> = serde_json::from_str(&body)
            .map_err(|e| AppError::launch(platform, format!("malformed run response: {e}")))?;

        if created.data.id.trim().is_empty() {
            return Err(AppError::launch(platform, "run response carried an empty id"));
        }
        Ok(created.data.id)
    }

    async fn run_status(&self, run_id: &str) -> Result<RunStatus> {
        let url = self.endpoint(&["actor-runs", run_id])?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| AppError::poll(run_id, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response, ERROR_BODY_LIMIT).await;
            return Err(AppError::poll(run_id, format!("HTTP {status} {body}")));
        }

        let body = response.text().await.map_err(|e| AppError::poll(run_id, e))?;
        let state: ApiResponse<RunState> = serde_json::from_str(&body)
            .map_err(|e| AppError::decode(format!("status of run {run_id}"), e))?;
        Ok(RunStatus::parse(&state.data.status))
    }

    async fn dataset_items(&self, run_id: &str) -> Result<Vec<RawPost>> {
        let url = self.endpoint(&["actor-runs", run_id, "dataset", "items"])?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| AppError::decode(format!("dataset of run {run_id}"), e))
    }
}
