// src/lib.rs

//! Yacht crew job scraper library.
//!
//! Launches remote scraping runs over crew groups and channels, waits for
//! them, and turns the posts that look like job offers into job records.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
