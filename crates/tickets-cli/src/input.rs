//! Conversion of raw flag text into typed values.
//!
//! Status and priority flags are case-insensitive; errors echo what the user
//! typed. Tag lists are comma-separated.

use tickets_core::{Priority, Status, ValidationError};

pub fn parse_status(raw: &str) -> Result<Status, ValidationError> {
    raw.trim()
        .to_ascii_uppercase()
        .parse()
        .map_err(|_| ValidationError::InvalidStatus(raw.to_string()))
}

pub fn parse_priority(raw: &str) -> Result<Priority, ValidationError> {
    raw.trim()
        .to_ascii_uppercase()
        .parse()
        .map_err(|_| ValidationError::InvalidPriority(raw.to_string()))
}

/// Split `a, b,,c` into `["a", "b", "c"]`.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reject blank entries in positional tag arguments.
pub fn require_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.iter().any(|t| t.trim().is_empty()) {
        return Err(ValidationError::EmptyTag);
    }
    Ok(())
}
