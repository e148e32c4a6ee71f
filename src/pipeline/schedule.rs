// src/pipeline/schedule.rs

//! Recurring cycle driver.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::pipeline::CycleOrchestrator;
use crate::utils::log;

/// Run cycles until `shutdown` turns true. Returns the number of cycles run.
///
/// Cycles start on a fixed grid of `interval` steps from the moment the
/// scheduler starts. At most one cycle runs at a time; grid slots that pass
/// while a cycle is still running are dropped, and the next cycle waits for
/// the first slot after the overrun ends.
pub async fn run_scheduled(
    orchestrator: &CycleOrchestrator,
    interval: Duration,
    run_on_start: bool,
    mut shutdown: watch::Receiver<bool>,
) -> usize {
    let interval = interval.max(Duration::from_secs(1));
    let origin = Instant::now();
    let mut next = if run_on_start { origin } else { origin + interval };

    log::sub_item(&format!(
        "Scheduling a cycle every {}s (run on start: {})",
        interval.as_secs(),
        run_on_start
    ));

    let mut cycles = 0;
    loop {
        tokio::select! {
            _ = tokio::time::sleep_until(next) => {}
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
                continue;
            }
        }

        if *shutdown.borrow() {
            break;
        }

        let report = orchestrator.run_cycle().await;
        cycles += 1;
        if report.skipped {
            ::log::debug!("Cycle {} skipped", cycles);
        }

        let following = next_slot(origin, interval, Instant::now());
        if following > next + interval {
            ::log::debug!("Cycle {} overran its slot; waiting for the next one", cycles);
        }
        next = following;
    }

    log::success(&format!("Scheduler stopped after {} cycles", cycles));
    cycles
}

/// First grid instant `origin + k * interval` strictly after `now`.
fn next_slot(origin: Instant, interval: Duration, now: Instant) -> Instant {
    let elapsed = now.saturating_duration_since(origin).as_nanos();
    let step = interval.as_nanos().max(1);
    let periods = elapsed / step + 1;
    let offset = u64::try_from(periods * step).unwrap_or(u64::MAX);
    origin + Duration::from_nanos(offset)
}
