// src/services/monitor.rs

//! Run monitor.
//!
//! Polls a launched run on a fixed interval until the remote side reports a
//! terminal state or the handle's local deadline passes. Runs that exceed the
//! deadline are abandoned, never cancelled remotely.
//!
//! ```text
//! PENDING ──tick──► poll ─┬─ SUCCEEDED ─────────────► Ok
//!    ▲                    ├─ FAILED/ABORTED/TIMED-OUT ► RunFailed
//!    │                    ├─ transport error ────────► Poll
//!    └──── elapsed ≤ ─────┴─ elapsed > timeout ──────► RunTimeout
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::error::{AppError, Result};
use crate::models::{RunHandle, RunStatus};
use crate::services::AutomationApi;

/// Source of time for everything that measures deadlines.
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    async fn sleep(&self, duration: Duration);
}

/// Wall clock backed by tokio timers.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Outcome of a single status check.
#[derive(Debug, Clone, PartialEq, Eq)]
enum MonitorState {
    Pending,
    Succeeded,
    Failed(RunStatus),
    LocalTimeout { elapsed_secs: i64 },
}

pub struct RunMonitor {
    api: Arc<dyn AutomationApi>,
    clock: Arc<dyn Clock>,
    interval: Duration,
    shutdown: watch::Receiver<bool>,
}

impl RunMonitor {
    pub fn new(
        api: Arc<dyn AutomationApi>,
        clock: Arc<dyn Clock>,
        interval: Duration,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            api,
            clock,
            interval,
            shutdown,
        }
    }

    /// Wait for `handle` to finish.
    ///
    /// Returns only after a terminal remote state was observed or more than
    /// `handle.timeout` has elapsed since `handle.started_at`. Shutdown is
    /// checked once per tick.
    pub async fn await_run(&self, handle: &RunHandle) -> Result<()> {
        let mut polls = 0usize;

        loop {
            self.clock.sleep(self.interval).await;

            if *self.shutdown.borrow() {
                log::warn!(
                    "Shutdown requested; abandoning run {} after {} polls",
                    handle.id,
                    polls
                );
                return Err(AppError::Cancelled(handle.id.clone()));
            }

            let status = self.api.run_status(&handle.id).await?;
            polls += 1;
            log::debug!("Run {} status: {} (poll {})", handle.id, status, polls);

            match self.next_state(handle, status) {
                MonitorState::Pending => continue,
                MonitorState::Succeeded => {
                    log::info!("Run {} succeeded after {} polls", handle.id, polls);
                    return Ok(());
                }
                MonitorState::Failed(status) => {
                    return Err(AppError::RunFailed {
                        run_id: handle.id.clone(),
                        status,
                    });
                }
                MonitorState::LocalTimeout { elapsed_secs } => {
                    log::warn!(
                        "Run {} still pending after {}s; abandoning it",
                        handle.id,
                        elapsed_secs
                    );
                    return Err(AppError::RunTimeout {
                        run_id: handle.id.clone(),
                        elapsed_secs,
                    });
                }
            }
        }
    }

    fn next_state(&self, handle: &RunHandle, status: RunStatus) -> MonitorState {
        match status {
            RunStatus::Succeeded => MonitorState::Succeeded,
            status if status.is_terminal() => MonitorState::Failed(status),
            _ => {
                let elapsed = self.clock.now() - handle.started_at;
                let elapsed_std = elapsed.to_std().unwrap_or(Duration::ZERO);
                if elapsed_std > handle.timeout {
                    MonitorState::LocalTimeout {
                        elapsed_secs: elapsed.num_seconds(),
                    }
                } else {
                    MonitorState::Pending
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Platform;
    use crate::services::testing::{FakeApi, ManualClock, StatusReply};

    const INTERVAL: Duration = Duration::from_secs(10);

    fn handle(clock: &ManualClock, timeout: Duration) -> RunHandle {
        RunHandle {
            id: "run-1".to_string(),
            platform: Platform::TelegramChannels,
            started_at: clock.now(),
            timeout,
        }
    }

    fn monitor(api: Arc<FakeApi>, clock: Arc<ManualClock>) -> (RunMonitor, watch::Sender<bool>) {
        let (tx, rx) = watch::channel(false);
        (RunMonitor::new(api, clock, INTERVAL, rx), tx)
    }

    #[tokio::test]
    async fn test_succeeds_on_terminal_success() {
        let api = Arc::new(FakeApi::new());
        api.script_status(
            "run-1",
            vec![
                StatusReply::Status(RunStatus::Pending("RUNNING".into())),
                StatusReply::Status(RunStatus::Succeeded),
            ],
        );
        let clock = Arc::new(ManualClock::at_epoch());
        let (monitor, _tx) = monitor(api.clone(), clock.clone());
        let handle = handle(&clock, Duration::from_secs(600));

        monitor.await_run(&handle).await.unwrap();

        assert_eq!(api.status_calls(), 2);
        assert_eq!(clock.now() - handle.started_at, chrono::Duration::seconds(20));
    }

    #[tokio::test]
    async fn test_remote_failure_states() {
        for status in [RunStatus::Failed, RunStatus::Aborted, RunStatus::TimedOut] {
            let api = Arc::new(FakeApi::new());
            api.script_status("run-1", vec![StatusReply::Status(status.clone())]);
            let clock = Arc::new(ManualClock::at_epoch());
            let (monitor, _tx) = monitor(api, clock.clone());

            let err = monitor
                .await_run(&handle(&clock, Duration::from_secs(600)))
                .await
                .unwrap_err();
            match err {
                AppError::RunFailed { status: got, .. } => assert_eq!(got, status),
                other => panic!("expected RunFailed, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_times_out_never_before_deadline() {
        let api = Arc::new(FakeApi::new());
        let clock = Arc::new(ManualClock::at_epoch());
        let (monitor, _tx) = monitor(api.clone(), clock.clone());
        let timeout = Duration::from_secs(600);
        let handle = handle(&clock, timeout);

        let err = monitor.await_run(&handle).await.unwrap_err();

        assert!(matches!(err, AppError::RunTimeout { .. }));
        let elapsed = (clock.now() - handle.started_at).to_std().unwrap();
        assert!(elapsed > timeout);
        assert!(elapsed <= timeout + INTERVAL);
        // 600s at a 10s interval: the 61st poll is the first past the deadline
        assert_eq!(api.status_calls(), 61);
    }

    #[tokio::test]
    async fn test_success_on_first_poll_past_deadline_wins() {
        let api = Arc::new(FakeApi::new());
        let mut replies: Vec<StatusReply> = (0..60)
            .map(|_| StatusReply::Status(RunStatus::Pending("RUNNING".into())))
            .collect();
        replies.push(StatusReply::Status(RunStatus::Succeeded));
        api.script_status("run-1", replies);
        let clock = Arc::new(ManualClock::at_epoch());
        let (monitor, _tx) = monitor(api, clock.clone());

        assert!(monitor
            .await_run(&handle(&clock, Duration::from_secs(600)))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_poll_error_is_immediate() {
        let api = Arc::new(FakeApi::new());
        api.script_status(
            "run-1",
            vec![
                StatusReply::Status(RunStatus::Pending("RUNNING".into())),
                StatusReply::TransportError,
            ],
        );
        let clock = Arc::new(ManualClock::at_epoch());
        let (monitor, _tx) = monitor(api.clone(), clock.clone());

        let err = monitor
            .await_run(&handle(&clock, Duration::from_secs(600)))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Poll { .. }));
        assert_eq!(api.status_calls(), 2);
    }

    #[tokio::test]
    async fn test_shutdown_observed_at_tick() {
        let api = Arc::new(FakeApi::new());
        let clock = Arc::new(ManualClock::at_epoch());
        let (monitor, tx) = monitor(api.clone(), clock.clone());
        tx.send(true).unwrap();

        let err = monitor
            .await_run(&handle(&clock, Duration::from_secs(600)))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Cancelled(_)));
        assert_eq!(api.status_calls(), 0);
        assert_eq!(clock.now() - clock.epoch(), chrono::Duration::seconds(10));
    }
}
