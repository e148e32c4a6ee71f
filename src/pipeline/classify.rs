// src/pipeline/classify.rs

//! Offline check of the classification and extraction heuristics.

use crate::models::{ExtractedJob, RawPost};
use crate::services::{FieldExtractor, PostClassifier};

/// Classify `text` and extract a job from it when it is a job posting.
pub fn run_classify(text: &str) -> Option<ExtractedJob> {
    if !PostClassifier.is_job_posting(text) {
        return None;
    }

    let post = RawPost {
        text: text.to_string(),
        ..RawPost::default()
    };
    Some(FieldExtractor.extract(&post))
}
