// src/utils/log.rs

//! Presentation helpers for cycle output.
//!
//! Thin wrappers over the `log` facade that give banners, numbered steps and
//! summaries a consistent shape. Filtering and timestamps come from whatever
//! logger the binary installs.

/// Log a banner.
pub fn header(title: &str) {
    let border = "═".repeat(60);
    ::log::info!("{}", border);
    ::log::info!("  {}", title);
    ::log::info!("{}", border);
}

/// Log a step in a process.
pub fn step(step_num: usize, total: usize, message: &str) {
    ::log::info!("{}", format_step(step_num, total, message));
}

/// Log a success message.
pub fn success(message: &str) {
    ::log::info!("✓ {}", message);
}

/// Log a warning message.
pub fn warn(message: &str) {
    ::log::warn!("! {}", message);
}

/// Log an error message.
pub fn error(message: &str) {
    ::log::error!("✗ {}", message);
}

/// Log a sub-item (indented).
pub fn sub_item(message: &str) {
    ::log::info!("    {}", message);
}

/// Log a summary section.
pub fn summary(title: &str, items: &[(&str, String)]) {
    for line in format_summary(title, items) {
        ::log::info!("{}", line);
    }
}

fn format_step(step_num: usize, total: usize, message: &str) -> String {
    format!("[STEP {}/{}] {}", step_num, total, message)
}

fn format_summary(title: &str, items: &[(&str, String)]) -> Vec<String> {
    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(format!("[SUMMARY] {}", title));
    for (key, value) in items {
        lines.push(format!("    {}: {}", key, value));
    }
    lines
}
