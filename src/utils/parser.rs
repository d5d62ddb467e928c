//! Parsing primitives for text extraction.
//!
//! The identifier scraping over CLI output is built on these; they know
//! nothing about deployments.

use regex::Regex;

/// Extract first match from content using regex pattern with capture group.
/// Pattern must contain exactly one capture group for the value to extract.
pub fn extract_first(content: &str, pattern: &str) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    re.captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
