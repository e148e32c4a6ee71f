// src/pipeline/cycle.rs

//! Scrape cycle.
//!
//! One cycle walks the enabled platforms in declared order, running
//! launch → await → fetch for each, then classifies, extracts and sinks every
//! collected post. A failing platform contributes nothing and a failing
//! record is counted; neither stops the cycle.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::{AppError, Result};
use crate::models::{ApiConfig, Config, CycleReport, PlatformConfig, PlatformOutcome, RawPost};
use crate::services::{
    ActorLauncher, ApifyClient, AutomationApi, Clock, FieldExtractor, JobSink, PostClassifier,
    ResultFetcher, RunMonitor,
};
use crate::storage::JobStore;
use crate::utils::log;

/// Whether scraping can run at all.
///
/// Decided once, at construction, from the presence of an API key.
#[derive(Clone)]
pub enum Capability {
    Enabled(Arc<dyn AutomationApi>),
    Disabled,
}

impl Capability {
    /// Read the key from the environment variable named by `config.api_key_env`.
    pub fn from_env(config: &ApiConfig) -> Result<Self> {
        Self::from_key(config, std::env::var(&config.api_key_env).ok())
    }

    /// A missing or blank key disables scraping.
    pub fn from_key(config: &ApiConfig, key: Option<String>) -> Result<Self> {
        match key {
            Some(key) if !key.trim().is_empty() => {
                let client = ApifyClient::new(config, key.trim())?;
                Ok(Self::Enabled(Arc::new(client)))
            }
            _ => Ok(Self::Disabled),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }
}

pub struct CycleOrchestrator {
    config: Arc<Config>,
    capability: Capability,
    clock: Arc<dyn Clock>,
    sink: JobSink,
    shutdown: watch::Receiver<bool>,
    classifier: PostClassifier,
    extractor: FieldExtractor,
}

impl CycleOrchestrator {
    pub fn new(
        config: Arc<Config>,
        capability: Capability,
        store: Arc<dyn JobStore>,
        clock: Arc<dyn Clock>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        let sink = JobSink::new(store, Arc::clone(&clock), &config.sink.source_label);
        Self {
            config,
            capability,
            clock,
            sink,
            shutdown,
            classifier: PostClassifier,
            extractor: FieldExtractor,
        }
    }

    /// Run one full cycle. Never fails; problems are logged and counted.
    pub async fn run_cycle(&self) -> CycleReport {
        let mut report = CycleReport::new(self.clock.now());

        let api = match &self.capability {
            Capability::Enabled(api) => Arc::clone(api),
            Capability::Disabled => {
                log::warn(&format!(
                    "{} is not set; scraping is disabled",
                    self.config.api.api_key_env
                ));
                report.skipped = true;
                report.finished_at = self.clock.now();
                return report;
            }
        };

        log::header("Crew scrape cycle");

        let platforms: Vec<&PlatformConfig> = self.config.enabled_platforms().collect();
        let mut posts: Vec<RawPost> = Vec::new();

        for (i, platform) in platforms.iter().enumerate() {
            log::step(i + 1, platforms.len(), &format!("Scraping {}", platform.platform));

            let mut outcome = PlatformOutcome {
                platform: platform.platform,
                run_id: None,
                posts: 0,
                error: None,
            };

            if *self.shutdown.borrow() {
                outcome.error = Some("shutdown requested".to_string());
                report.platforms.push(outcome);
                continue;
            }

            match self.collect(&api, platform, &mut outcome).await {
                Ok(collected) => {
                    outcome.posts = collected.len();
                    log::sub_item(&format!("{} posts", collected.len()));
                    posts.extend(collected);
                }
                Err(e) => {
                    log::error(&format!("{} scrape failed: {}", platform.platform, e));
                    outcome.error = Some(e.to_string());
                }
            }
            report.platforms.push(outcome);
        }

        report.posts = posts.len();
        self.process(&posts, &mut report).await;
        report.finished_at = self.clock.now();

        log_report(&report);
        report
    }

    /// Launch, await and fetch a single platform.
    async fn collect(
        &self,
        api: &Arc<dyn AutomationApi>,
        platform: &PlatformConfig,
        outcome: &mut PlatformOutcome,
    ) -> Result<Vec<RawPost>> {
        let launcher = ActorLauncher::new(Arc::clone(api), Arc::clone(&self.clock));
        let handle = launcher.launch(platform).await?;
        outcome.run_id = Some(handle.id.clone());

        let monitor = RunMonitor::new(
            Arc::clone(api),
            Arc::clone(&self.clock),
            self.config.api.poll_interval(),
            self.shutdown.clone(),
        );
        monitor.await_run(&handle).await?;

        ResultFetcher::new(Arc::clone(api)).fetch(&handle).await
    }

    /// Classify, extract and sink every post, in order.
    async fn process(&self, posts: &[RawPost], report: &mut CycleReport) {
        for post in posts {
            if !self.classifier.is_job_posting(&post.text) {
                continue;
            }
            report.job_posts += 1;

            let job = self.extractor.extract(post);
            let title = job.title.clone();
            match self.sink.sink(job).await {
                Ok(_) => report.saved += 1,
                Err(e) => {
                    report.sink_failures += 1;
                    log::warn(&format!("Failed to save job \"{}\": {}", title, describe(&e)));
                }
            }
        }
    }
}

fn describe(error: &AppError) -> String {
    match error {
        AppError::Sink { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

fn log_report(report: &CycleReport) {
    let failed: Vec<String> = report
        .platforms
        .iter()
        .filter(|p| !p.succeeded())
        .map(|p| p.platform.to_string())
        .collect();

    log::summary(
        "Cycle complete",
        &[
            ("Posts", report.posts.to_string()),
            ("Job posts", report.job_posts.to_string()),
            ("Saved", report.saved.to_string()),
            ("Sink failures", report.sink_failures.to_string()),
            (
                "Failed platforms",
                if failed.is_empty() {
                    "none".to_string()
                } else {
                    failed.join(", ")
                },
            ),
            (
                "Duration",
                format!("{}s", (report.finished_at - report.started_at).num_seconds()),
            ),
        ],
    );
}
