//! Pipeline entry points.
//!
//! - `CycleOrchestrator::run_cycle`: one scrape cycle across all platforms
//! - `run_scheduled`: startup cycle plus the recurring interval
//! - `run_validate`: configuration check
//! - `run_classify`: heuristics over a single text

pub mod classify;
pub mod cycle;
pub mod schedule;
pub mod validate;

pub use classify::run_classify;
pub use cycle::{Capability, CycleOrchestrator};
pub use schedule::run_scheduled;
pub use validate::run_validate;
