//! Service layer for the scraper.
//!
//! This module contains the business logic for:
//! - Talking to the automation platform (`ApifyClient`)
//! - Starting actor runs (`ActorLauncher`)
//! - Waiting for runs to finish (`RunMonitor`)
//! - Reading run results (`ResultFetcher`)
//! - Recognising job posts (`PostClassifier`)
//! - Extracting job fields (`FieldExtractor`)
//! - Persisting jobs (`JobSink`)

mod apify;
mod classifier;
mod extractor;
mod fetcher;
mod launcher;
mod monitor;
mod sink;

#[cfg(test)]
pub(crate) mod testing;

pub use apify::{ApifyClient, AutomationApi};
pub use classifier::PostClassifier;
pub use extractor::FieldExtractor;
pub use fetcher::ResultFetcher;
pub use launcher::ActorLauncher;
pub use monitor::{Clock, RunMonitor, SystemClock};
pub use sink::JobSink;
