//! Deadline inference from natural-language date phrases.
//!
//! Best-effort: a handful of phrases, checked in order, first match wins.
//! Every inferred deadline lands at 17:00 in the offset of `now`.

use chrono::{Datelike, Duration};

use crate::constants::DEADLINE_HOUR;
use crate::types::Timestamp;
use crate::util::at_hour;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeadlineRule {
    EndOfToday,
    Tomorrow,
    ThisWeek,
    NextWeek,
}

const DEADLINE_PHRASES: &[(&[&str], DeadlineRule)] = &[
    (&["by eod", "end of day", "by today"], DeadlineRule::EndOfToday),
    (&["by tomorrow", "due tomorrow"], DeadlineRule::Tomorrow),
    (&["by this week", "due this week"], DeadlineRule::ThisWeek),
    (&["by next week", "due next week"], DeadlineRule::NextWeek),
];

/// Infer a deadline from `text`, relative to `now`. `None` when no phrase matches.
pub fn infer_deadline(text: &str, now: Timestamp) -> Option<Timestamp> {
    let lower = text.to_lowercase();
    let rule = DEADLINE_PHRASES
        .iter()
        .find(|(phrases, _)| phrases.iter().any(|p| lower.contains(p)))
        .map(|(_, rule)| *rule)?;

    let today = now.date_naive();
    let date = match rule {
        DeadlineRule::EndOfToday => today,
        DeadlineRule::Tomorrow => today + Duration::days(1),
        DeadlineRule::ThisWeek => today + Duration::days(days_until_friday(now)),
        DeadlineRule::NextWeek => today + Duration::days(7),
    };

    at_hour(date, DEADLINE_HOUR, now)
}

/// Days from `now` to the coming Friday; 0 on a Friday.
fn days_until_friday(now: Timestamp) -> i64 {
    let weekday = now.weekday().num_days_from_sunday() as i64;
    (5 - weekday + 7) % 7
}
