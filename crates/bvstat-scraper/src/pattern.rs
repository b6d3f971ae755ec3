//! Single-capture pattern extraction.
//!
//! "Not found" is an ordinary outcome here, so both helpers return empty
//! results instead of errors. Callers decide whether absence is fatal.

use regex::Regex;

/// Capture group 1 of the first match of `pattern` in `content`.
///
/// Returns `None` when nothing matches or the pattern has no first group.
pub fn extract<'t>(pattern: &Regex, content: &'t str) -> Option<&'t str> {
    pattern
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Capture group 1 of every non-overlapping match, left to right.
pub fn extract_all<'t>(pattern: &Regex, content: &'t str) -> Vec<&'t str> {
    pattern
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}
