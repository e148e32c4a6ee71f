//! Test doubles for the service layer.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::error::{AppError, Result};
use crate::models::{ExtractedJob, Platform, RawPost, RunRequest, RunStatus};
use crate::services::{AutomationApi, Clock};

/// Clock that only moves when slept on or advanced.
pub struct ManualClock {
    epoch: DateTime<Utc>,
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn at_epoch() -> Self {
        let epoch = Utc.with_ymd_and_hms(2025, 6, 1, 6, 0, 0).unwrap();
        Self {
            epoch,
            now: Mutex::new(epoch),
        }
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }

    async fn sleep(&self, duration: Duration) {
        let mut now = self.now.lock().unwrap();
        *now = *now + chrono::Duration::from_std(duration).unwrap();
    }
}

/// Scripted reply of the status endpoint.
#[derive(Debug, Clone)]
pub enum StatusReply {
    Status(RunStatus),
    TransportError,
}

/// Scripted automation API.
///
/// Runs are launched per actor id; status scripts replay in order and repeat
/// their last reply. Runs without a script stay `RUNNING`.
#[derive(Default)]
pub struct FakeApi {
    run_ids: Mutex<HashMap<String, String>>,
    statuses: Mutex<HashMap<String, VecDeque<StatusReply>>>,
    items: Mutex<HashMap<String, Vec<RawPost>>>,
    malformed: Mutex<HashSet<String>>,
    launched: Mutex<Vec<(String, RunRequest)>>,
    status_calls: Mutex<usize>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Any actor id launches `run_id`.
    pub fn push_run_id(&self, run_id: &str) {
        self.expect_run("*", run_id);
    }

    pub fn expect_run(&self, actor_id: &str, run_id: &str) {
        self.run_ids
            .lock()
            .unwrap()
            .insert(actor_id.to_string(), run_id.to_string());
    }

    pub fn script_status(&self, run_id: &str, replies: Vec<StatusReply>) {
        self.statuses
            .lock()
            .unwrap()
            .insert(run_id.to_string(), replies.into());
    }

    pub fn set_items(&self, run_id: &str, posts: Vec<RawPost>) {
        self.items
            .lock()
            .unwrap()
            .insert(run_id.to_string(), posts);
    }

    pub fn set_malformed_items(&self, run_id: &str) {
        self.malformed.lock().unwrap().insert(run_id.to_string());
    }

    pub fn launched(&self) -> Vec<(String, RunRequest)> {
        self.launched.lock().unwrap().clone()
    }

    pub fn status_calls(&self) -> usize {
        *self.status_calls.lock().unwrap()
    }
}

#[async_trait]
impl AutomationApi for FakeApi {
    async fn start_run(
        &self,
        platform: Platform,
        actor_id: &str,
        request: &RunRequest,
    ) -> Result<String> {
        self.launched
            .lock()
            .unwrap()
            .push((actor_id.to_string(), request.clone()));

        let run_ids = self.run_ids.lock().unwrap();
        run_ids
            .get(actor_id)
            .or_else(|| run_ids.get("*"))
            .cloned()
            .ok_or_else(|| AppError::launch(platform, "HTTP 401 Unauthorized"))
    }

    async fn run_status(&self, run_id: &str) -> Result<RunStatus> {
        *self.status_calls.lock().unwrap() += 1;

        let mut statuses = self.statuses.lock().unwrap();
        let reply = match statuses.get_mut(run_id) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        match reply {
            Some(StatusReply::Status(status)) => Ok(status),
            Some(StatusReply::TransportError) => Err(AppError::poll(run_id, "connection reset")),
            None => Ok(RunStatus::Pending("RUNNING".to_string())),
        }
    }

    async fn dataset_items(&self, run_id: &str) -> Result<Vec<RawPost>> {
        if self.malformed.lock().unwrap().contains(run_id) {
            return Err(AppError::decode(
                format!("dataset of run {run_id}"),
                "expected value at line 1 column 1",
            ));
        }
        Ok(self
            .items
            .lock()
            .unwrap()
            .get(run_id)
            .cloned()
            .unwrap_or_default())
    }
}

pub fn post(text: &str) -> RawPost {
    RawPost {
        text: text.to_string(),
        url: "https://example.com/post".to_string(),
        ..RawPost::default()
    }
}

pub fn job(title: &str) -> ExtractedJob {
    ExtractedJob {
        title: title.to_string(),
        company: "Private Yacht".to_string(),
        location: String::new(),
        job_type: "crew".to_string(),
        vessel_type: "yacht".to_string(),
        duration: String::new(),
        salary: String::new(),
        description: format!("{title} wanted"),
        source_url: "https://example.com/post".to_string(),
        posted_at: None,
    }
}
