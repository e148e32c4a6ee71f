// src/services/classifier.rs

//! Job posting classifier.
//!
//! A text is a job posting when it mentions at least one crew role or hiring
//! phrase and at least one vessel term. Matching is case-insensitive substring
//! containment.

use crate::utils::contains_any;

/// Hiring phrases and crew roles.
pub const JOB_KEYWORDS: &[&str] = &[
    "hiring",
    "job",
    "position",
    "crew",
    "vacancy",
    "looking for",
    "seeking",
    "needed",
    "required",
    "opportunity",
    "application",
    "captain",
    "engineer",
    "stewardess",
    "chef",
    "deckhand",
    "bosun",
    "officer",
    "stew",
    "cook",
    "mate",
];

/// Vessel and yachting terms.
pub const VESSEL_KEYWORDS: &[&str] = &[
    "yacht",
    "superyacht",
    "motor yacht",
    "sailing yacht",
    "m/y",
    "s/y",
    "vessel",
    "boat",
    "ship",
    "charter",
    "private",
];

#[derive(Debug, Default, Clone, Copy)]
pub struct PostClassifier;

impl PostClassifier {
    pub fn is_job_posting(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        contains_any(&text, JOB_KEYWORDS) && contains_any(&text, VESSEL_KEYWORDS)
    }
}
