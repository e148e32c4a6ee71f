//! Utility functions and helpers.

pub mod http;
pub mod log;

/// Return the first value whose keyword occurs in `haystack`.
///
/// `haystack` must already be lower-cased; keywords are lower-case literals.
pub fn first_match<'a>(haystack: &str, table: &[(&str, &'a str)]) -> Option<&'a str> {
    table
        .iter()
        .find(|(keyword, _)| haystack.contains(keyword))
        .map(|(_, value)| *value)
}

/// Whether any keyword occurs in the already lower-cased `haystack`.
pub fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword))
}

/// Cut `text` to at most `max_chars` characters, appending `marker` when cut.
pub fn truncate_chars(text: &str, max_chars: usize, marker: &str) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], marker),
        None => text.to_string(),
    }
}
