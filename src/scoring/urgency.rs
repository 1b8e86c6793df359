//! Urgency scorer: how soon does this need attention?
//!
//! Points (additive, then clamped to 100):
//! - Priority label base: urgent 40, high 30, medium 15, low 5, unlabeled 10
//! - Urgent keywords: 10 per distinct keyword, max 30
//! - Recency: <1h 15, <4h 10, <24h 5
//! - Deadline proximity: overdue 25, <4h 20, <24h 15, <48h 10
//! - Addresses the user: 15

use crate::constants::URGENT_KEYWORDS;
use crate::types::{PriorityLabel, Timestamp};
use crate::util::hours_between;

use super::{clamp_score, count_keywords, keyword_bonus};

/// Inputs for one urgency computation.
pub struct UrgencyContext<'a> {
    pub content: &'a str,
    pub timestamp: Timestamp,
    pub priority: Option<PriorityLabel>,
    pub due_date: Option<Timestamp>,
    pub addresses_user: bool,
    pub extra_keywords: &'a [String],
}

/// Urgency with its per-rule breakdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UrgencyScore {
    pub total: u8,
    pub base: u32,
    pub keyword_bonus: u32,
    pub recency_bonus: u32,
    pub deadline_bonus: u32,
    pub addressing_bonus: u32,
    pub hours_to_deadline: Option<f64>,
}

pub fn score_urgency(ctx: &UrgencyContext, now: Timestamp) -> UrgencyScore {
    let base = PriorityLabel::base_urgency(ctx.priority);

    let lower = ctx.content.to_lowercase();
    let keyword = keyword_bonus(count_keywords(&lower, URGENT_KEYWORDS, ctx.extra_keywords));

    let recency = recency_bonus(hours_between(ctx.timestamp, now));

    let hours_to_deadline = ctx.due_date.map(|due| hours_between(now, due));
    let deadline = hours_to_deadline.map(deadline_bonus).unwrap_or(0);

    let addressing = if ctx.addresses_user { 15 } else { 0 };

    UrgencyScore {
        total: clamp_score(base + keyword + recency + deadline + addressing),
        base,
        keyword_bonus: keyword,
        recency_bonus: recency,
        deadline_bonus: deadline,
        addressing_bonus: addressing,
        hours_to_deadline,
    }
}

/// Timestamps in the future count as brand new.
fn recency_bonus(age_hours: f64) -> u32 {
    if age_hours < 1.0 {
        15
    } else if age_hours < 4.0 {
        10
    } else if age_hours < 24.0 {
        5
    } else {
        0
    }
}

/// Overdue is checked first so a negative distance never lands in the <4h bucket.
fn deadline_bonus(hours_to_due: f64) -> u32 {
    if hours_to_due < 0.0 {
        25
    } else if hours_to_due < 4.0 {
        20
    } else if hours_to_due < 24.0 {
        15
    } else if hours_to_due < 48.0 {
        10
    } else {
        0
    }
}
