//! Small shared helpers: log-friendly truncation and seed-list parsing.

use crate::error::Result;
use std::path::Path;

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and byte count
/// indicator appended. The cut happens on character boundaries, so accented
/// page text never splits mid-character.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max).collect();
    format!("{}…(+{} bytes)", cut, s.len() - cut.len())
}

/// Parse seed-list text into URLs.
///
/// One URL per line; blank lines and `#` comment lines are ignored and
/// surrounding whitespace is trimmed.
pub fn parse_seed_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Read a seed-list file (one URL per line, `#` comments allowed).
pub fn read_seed_list(path: &Path) -> Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(parse_seed_list(&raw))
}
