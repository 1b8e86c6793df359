//! Priority ranking across every record kind.
//!
//! Each record gets an urgency and an impact score, combined with
//! kind-specific weights. Calendar events replace the generic urgency with
//! a time-to-start curve. The result is sorted by overall score, highest
//! first, ties kept in corpus order.

use std::collections::HashMap;

use crate::config::EngineConfig;
use crate::constants::ADDRESSING_PHRASES;
use crate::corpus::Corpus;
use crate::scoring::{
    score_impact, score_urgency, ImpactContext, ImpactScore, UrgencyContext, MAX_SCORE,
};
use crate::types::{
    CalendarEvent, MessageRecord, PriorityItem, PriorityLabel, PriorityScore, RecordKind,
    ScoreFactors, StakeholderImportance, Timestamp,
};
use crate::util::{hours_between, truncate_chars};

const TITLE_MAX_CHARS: usize = 60;
const DESCRIPTION_MAX_CHARS: usize = 150;

/// Urgency/impact weights for one record kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindWeights {
    pub urgency: f64,
    pub impact: f64,
}

impl RecordKind {
    pub fn weights(self) -> KindWeights {
        match self {
            RecordKind::Channel | RecordKind::Email => KindWeights {
                urgency: 0.6,
                impact: 0.4,
            },
            RecordKind::Direct => KindWeights {
                urgency: 0.7,
                impact: 0.3,
            },
            RecordKind::Event => KindWeights {
                urgency: 0.5,
                impact: 0.5,
            },
        }
    }
}

/// A record paired with its score for this pass.
#[derive(Debug, Clone)]
pub struct RankedRecord<'a> {
    pub record: &'a MessageRecord,
    pub score: PriorityScore,
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Score one record. Pure: same record, config and `now` give the same score.
pub fn score_record(
    record: &MessageRecord,
    config: &EngineConfig,
    now: Timestamp,
) -> PriorityScore {
    let content = record.content();
    let sender = record.sender();
    let addresses_user = addresses_user(record, config, &content);
    let has_action_items = has_action_items(record);

    let impact = score_impact(
        &ImpactContext {
            sender: &sender,
            content: &content,
            has_action_items,
        },
        config,
    );

    let (urgency, hours_to_deadline) = match record {
        MessageRecord::Event(event) => (
            event_urgency(event, now),
            Some(hours_between(now, event.start_time)),
        ),
        _ => {
            let scored = score_urgency(
                &UrgencyContext {
                    content: &content,
                    timestamp: record.timestamp(),
                    priority: record.priority(),
                    due_date: record.due_date(),
                    addresses_user,
                    extra_keywords: &config.extra_urgent_keywords,
                },
                now,
            );
            (scored.total, scored.hours_to_deadline)
        }
    };

    let weights = record.kind().weights();
    let overall = urgency as f64 * weights.urgency + impact.total as f64 * weights.impact;

    PriorityScore {
        record_id: record.id().to_string(),
        urgency_score: urgency,
        impact_score: impact.total,
        overall_score: overall,
        factors: ScoreFactors {
            has_deadline: record.due_date().is_some(),
            mentions_user: addresses_user,
            from_vip: impact.from_vip,
            has_action_items,
            stakeholder_importance: stakeholder_importance(&impact, config, &sender),
            time_to_deadline_hours: hours_to_deadline,
        },
    }
}

/// Urgency for a calendar event from time until it starts.
///
/// <1h 90, <4h 70, <24h 50, <48h 30, otherwise 0; +10 when prep is needed.
/// Events that have already ended score 0.
pub fn event_urgency(event: &CalendarEvent, now: Timestamp) -> u8 {
    if event.end_time <= now {
        return 0;
    }
    let hours_until = hours_between(now, event.start_time);
    let base: u32 = if hours_until < 1.0 {
        90
    } else if hours_until < 4.0 {
        70
    } else if hours_until < 24.0 {
        50
    } else if hours_until < 48.0 {
        30
    } else {
        0
    };
    let prep = if event.requires_prep { 10 } else { 0 };
    (base + prep).min(MAX_SCORE) as u8
}

fn addresses_user(record: &MessageRecord, config: &EngineConfig, content: &str) -> bool {
    match record {
        MessageRecord::Channel(m) => {
            !m.mentions.is_empty() || config.is_mentioned(&m.mentions, content)
        }
        MessageRecord::Email(m) => config.is_recipient(&m.to) || config.is_mentioned(&[], content),
        MessageRecord::Direct(m) => {
            let lower = content.to_lowercase();
            !m.mentions.is_empty()
                || config.is_mentioned(&m.mentions, content)
                || ADDRESSING_PHRASES.iter().any(|p| lower.contains(p))
        }
        MessageRecord::Event(e) => config.is_recipient(&e.attendees),
    }
}

fn has_action_items(record: &MessageRecord) -> bool {
    match record {
        MessageRecord::Channel(m) => m.has_action_items,
        MessageRecord::Email(m) => m.is_flagged_for_action(),
        MessageRecord::Direct(_) => false,
        MessageRecord::Event(e) => e.has_action_items,
    }
}

fn stakeholder_importance(
    impact: &ImpactScore,
    config: &EngineConfig,
    sender: &str,
) -> StakeholderImportance {
    if impact.from_vip {
        StakeholderImportance::High
    } else if config.is_client(sender) {
        StakeholderImportance::Medium
    } else {
        StakeholderImportance::Low
    }
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Score every record and sort by overall score, highest first.
///
/// The sort is stable, so equal scores keep corpus order.
pub fn rank<'a>(
    corpus: &'a Corpus,
    config: &EngineConfig,
    now: Timestamp,
) -> Vec<RankedRecord<'a>> {
    let mut ranked: Vec<RankedRecord<'a>> = corpus
        .iter()
        .map(|record| RankedRecord {
            record,
            score: score_record(record, config, now),
        })
        .collect();

    ranked.sort_by(|a, b| b.score.overall_score.total_cmp(&a.score.overall_score));

    log::debug!("rank: scored {} records", ranked.len());
    ranked
}

/// Map the first `n` scores to dashboard items, resolving each against the corpus.
///
/// A score whose record is gone degrades to an "Unknown Item" placeholder.
pub fn priority_items(scores: &[PriorityScore], corpus: &Corpus, n: usize) -> Vec<PriorityItem> {
    let index: HashMap<&str, &MessageRecord> = corpus.iter().rev().map(|r| (r.id(), r)).collect();

    scores
        .iter()
        .take(n)
        .map(|score| match index.get(score.record_id.as_str()) {
            Some(record) => to_priority_item(record, score),
            None => {
                log::warn!(
                    "priority_items: record {} no longer in corpus, using placeholder",
                    score.record_id
                );
                unknown_item(score)
            }
        })
        .collect()
}

/// Rank the corpus and return the top `n` dashboard items.
pub fn top_priorities(
    corpus: &Corpus,
    config: &EngineConfig,
    now: Timestamp,
    n: usize,
) -> Vec<PriorityItem> {
    let scores: Vec<PriorityScore> = rank(corpus, config, now)
        .into_iter()
        .take(n)
        .map(|ranked| ranked.score)
        .collect();
    priority_items(&scores, corpus, n)
}

fn to_priority_item(record: &MessageRecord, score: &PriorityScore) -> PriorityItem {
    let (title, description) = match record {
        MessageRecord::Channel(m) => (
            truncate_chars(&m.content, TITLE_MAX_CHARS),
            truncate_chars(&m.content, DESCRIPTION_MAX_CHARS),
        ),
        MessageRecord::Email(m) => (
            truncate_chars(&m.subject, TITLE_MAX_CHARS),
            truncate_chars(&m.body, DESCRIPTION_MAX_CHARS),
        ),
        MessageRecord::Direct(m) => (
            format!("Message from {}", m.sender),
            truncate_chars(&m.content, DESCRIPTION_MAX_CHARS),
        ),
        MessageRecord::Event(e) => {
            let when = e.start_time.format("%a %b %-d, %-I:%M %p").to_string();
            let description = if e.description.trim().is_empty() {
                format!("Starts {}", when)
            } else {
                format!(
                    "Starts {} · {}",
                    when,
                    truncate_chars(&e.description, DESCRIPTION_MAX_CHARS)
                )
            };
            (truncate_chars(&e.title, TITLE_MAX_CHARS), description)
        }
    };

    PriorityItem {
        id: record.id().to_string(),
        title,
        description,
        priority: record.priority().unwrap_or(PriorityLabel::Medium),
        source: record.source_label(),
        due_date: record.due_date(),
        score: score.overall_score,
    }
}

fn unknown_item(score: &PriorityScore) -> PriorityItem {
    PriorityItem {
        id: score.record_id.clone(),
        title: "Unknown Item".to_string(),
        description: String::new(),
        priority: PriorityLabel::Medium,
        source: "Unknown".to_string(),
        due_date: None,
        score: score.overall_score,
    }
}
