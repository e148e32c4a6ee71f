// src/services/extractor.rs

//! Field extractor.
//!
//! Every field is looked up in its own ordered `(keyword, value)` table
//! against the lower-cased post text. The first entry in declaration order
//! whose keyword occurs in the text wins. Tables list a keyword before any
//! other keyword it contains ("chief engineer" before "engineer"), so the
//! most specific phrase always takes priority.

use crate::models::{ExtractedJob, RawPost};
use crate::utils::{first_match, truncate_chars};

/// Maximum characters kept in the stored description.
pub const DESCRIPTION_LIMIT: usize = 1000;
/// Appended to descriptions cut at [`DESCRIPTION_LIMIT`].
pub const TRUNCATION_MARKER: &str = "...";

pub const DEFAULT_TITLE: &str = "Yacht Crew Position";
pub const DEFAULT_COMPANY: &str = "Private Yacht";
pub const DEFAULT_JOB_TYPE: &str = "crew";
pub const DEFAULT_VESSEL_TYPE: &str = "yacht";

pub const TITLES: &[(&str, &str)] = &[
    ("captain", "Captain"),
    ("chief officer", "Chief Officer"),
    ("first officer", "First Officer"),
    ("second officer", "Second Officer"),
    ("bosun", "Bosun"),
    ("deckhand", "Deckhand"),
    ("able seaman", "Able Seaman"),
    ("chief engineer", "Chief Engineer"),
    ("first engineer", "First Engineer"),
    ("second engineer", "Second Engineer"),
    ("engineer", "Engineer"),
    ("chief stewardess", "Chief Stewardess"),
    ("chief stew", "Chief Stewardess"),
    ("stewardess", "Stewardess"),
    ("stew", "Stewardess"),
    ("chef", "Chef"),
    ("cook", "Cook"),
    ("purser", "Purser"),
];

/// Vessel prefixes that name the operator; trailing space avoids "m/yacht".
pub const COMPANIES: &[(&str, &str)] = &[("m/y ", "Motor Yacht"), ("s/y ", "Sailing Yacht")];

pub const LOCATIONS: &[(&str, &str)] = &[
    ("mediterranean", "Mediterranean"),
    ("caribbean", "Caribbean"),
    ("bahamas", "Bahamas"),
    ("florida", "Florida"),
    ("french riviera", "French Riviera"),
    ("monaco", "Monaco"),
    ("antibes", "Antibes"),
    ("palma", "Palma"),
    ("barcelona", "Barcelona"),
    ("genoa", "Genoa"),
    ("miami", "Miami"),
    ("fort lauderdale", "Fort Lauderdale"),
    ("newport", "Newport"),
    ("sardinia", "Sardinia"),
    ("corsica", "Corsica"),
    ("ibiza", "Ibiza"),
    ("worldwide", "Worldwide"),
    ("global", "Global"),
    ("anywhere", "Anywhere"),
];

pub const JOB_TYPES: &[(&str, &str)] = &[
    ("captain", "deck"),
    ("officer", "deck"),
    ("bosun", "deck"),
    ("deckhand", "deck"),
    ("engineer", "engine"),
    ("eto", "engine"),
    ("stewardess", "interior"),
    ("stew", "interior"),
    ("chef", "interior"),
    ("cook", "interior"),
];

pub const VESSEL_TYPES: &[(&str, &str)] = &[
    ("motor yacht", "motor yacht"),
    ("m/y", "motor yacht"),
    ("sailing yacht", "sailing yacht"),
    ("s/y", "sailing yacht"),
    ("superyacht", "superyacht"),
    ("catamaran", "catamaran"),
];

pub const DURATIONS: &[(&str, &str)] = &[
    ("permanent", "permanent"),
    ("rotational", "rotational"),
    ("seasonal", "seasonal"),
    ("summer season", "summer season"),
    ("winter season", "winter season"),
    ("4/4", "4/4"),
    ("6/6", "6/6"),
    ("8/4", "8/4"),
    ("2/2", "2/2"),
    ("3/3", "3/3"),
    ("6 months", "6 months"),
    ("4 months", "4 months"),
    ("8 months", "8 months"),
];

/// A line mentioning any of these is taken as the salary line.
pub const SALARY_MARKERS: &[&str] = &["€", "$", "£", "salary", "wage"];

#[derive(Debug, Default, Clone, Copy)]
pub struct FieldExtractor;

impl FieldExtractor {
    /// Derive a job from a post already classified as a job posting.
    ///
    /// Depends only on the post; the same post always yields the same job.
    pub fn extract(&self, post: &RawPost) -> ExtractedJob {
        let lower = post.text.to_lowercase();
        let lookup = |table: &[(&str, &'static str)], default: &str| {
            first_match(&lower, table).unwrap_or(default).to_string()
        };

        ExtractedJob {
            title: lookup(TITLES, DEFAULT_TITLE),
            company: lookup(COMPANIES, DEFAULT_COMPANY),
            location: lookup(LOCATIONS, ""),
            job_type: lookup(JOB_TYPES, DEFAULT_JOB_TYPE),
            vessel_type: lookup(VESSEL_TYPES, DEFAULT_VESSEL_TYPE),
            duration: lookup(DURATIONS, ""),
            salary: extract_salary(&post.text),
            description: clean_description(&post.text),
            source_url: post.url.clone(),
            posted_at: post.timestamp,
        }
    }
}

/// First line carrying a currency symbol or pay keyword, trimmed.
///
/// The line keeps its original casing rather than being lower-cased, so
/// "Salary: €9,500 DOE" reads as posted.
fn extract_salary(text: &str) -> String {
    text.lines()
        .find(|line| {
            let lower = line.to_lowercase();
            SALARY_MARKERS.iter().any(|marker| lower.contains(marker))
        })
        .map(|line| line.trim().to_string())
        .unwrap_or_default()
}

fn clean_description(text: &str) -> String {
    truncate_chars(text.trim(), DESCRIPTION_LIMIT, TRUNCATION_MARKER)
}
