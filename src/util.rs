use chrono::{NaiveDate, TimeZone};
use sha2::{Digest, Sha256};

use crate::types::Timestamp;

/// Fractional hours from `from` to `to`. Negative when `to` is earlier.
pub fn hours_between(from: Timestamp, to: Timestamp) -> f64 {
    (to - from).num_seconds() as f64 / 3600.0
}

/// `date` at `hour:00` in the same offset as `reference`.
pub fn at_hour(date: NaiveDate, hour: u32, reference: Timestamp) -> Option<Timestamp> {
    let naive = date.and_hms_opt(hour, 0, 0)?;
    reference.offset().from_local_datetime(&naive).single()
}

/// Truncate to at most `max` characters, appending "..." when cut.
///
/// Counts chars, not bytes, so multi-byte text never splits mid-character.
pub fn truncate_chars(text: &str, max: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}

/// Collapse runs of whitespace and trim.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Stable hex fingerprint of the given parts.
pub fn fingerprint(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update(b"|");
    }
    hex::encode(hasher.finalize())
}
