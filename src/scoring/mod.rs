//! Urgency and impact scorers.
//!
//! Both are additive point systems clamped to 0–100. They take plain
//! borrowed inputs so the ranker can feed them from any record kind.

pub mod impact;
pub mod urgency;

pub use impact::{score_impact, ImpactContext, ImpactScore};
pub use urgency::{score_urgency, UrgencyContext, UrgencyScore};

/// Ceiling for every per-record score.
pub const MAX_SCORE: u32 = 100;

/// Count how many of `keywords` (plus `extra`) appear in `lower_text`.
///
/// Each keyword counts once no matter how often it repeats.
pub(crate) fn count_keywords(lower_text: &str, keywords: &[&str], extra: &[String]) -> u32 {
    let built_in = keywords.iter().filter(|kw| lower_text.contains(**kw)).count();
    let added = extra
        .iter()
        .map(|kw| kw.trim().to_lowercase())
        .filter(|kw| !kw.is_empty() && !keywords.contains(&kw.as_str()))
        .filter(|kw| lower_text.contains(kw.as_str()))
        .count();
    (built_in + added) as u32
}

/// `min(count * 10, 30)`, the shared keyword bonus curve.
pub(crate) fn keyword_bonus(count: u32) -> u32 {
    (count * 10).min(30)
}

pub(crate) fn clamp_score(points: u32) -> u8 {
    points.min(MAX_SCORE) as u8
}
