//! Action extraction: one action item per qualifying sentence of a record.
//!
//! A sentence qualifies when it carries a whole-word action verb and an
//! addressing cue for the user. Emails flagged "action required" drop the
//! addressing requirement; their sentences must still be longer than a
//! fragment.

pub mod deadline;
pub mod sentences;

pub use deadline::infer_deadline;
pub use sentences::{has_action_verb, has_addressing_phrase, split_sentences};

use crate::config::EngineConfig;
use crate::constants::MIN_EMAIL_SENTENCE_CHARS;
use crate::corpus::Corpus;
use crate::types::{ActionItem, MessageRecord, PriorityLabel, Timestamp};

/// Deterministic id, so completions recorded against it survive re-extraction.
pub fn action_id(record_id: &str, sentence_index: usize) -> String {
    format!("{}-action-{}", record_id, sentence_index)
}

/// Extract action items from one record. A record with no qualifying
/// sentence yields an empty list.
pub fn extract_actions(
    record: &MessageRecord,
    config: &EngineConfig,
    now: Timestamp,
) -> Vec<ActionItem> {
    let text = record.content();
    let verb_alone = match record {
        MessageRecord::Email(m) => m.is_flagged_for_action(),
        _ => false,
    };

    let items: Vec<ActionItem> = split_sentences(&text)
        .into_iter()
        .enumerate()
        .filter(|(_, sentence)| qualifies(record, config, sentence, verb_alone))
        .map(|(index, sentence)| ActionItem {
            id: action_id(record.id(), index),
            due_date: infer_deadline(&sentence, now).or_else(|| record.due_date()),
            description: sentence,
            source: record.source_label(),
            source_message_id: record.id().to_string(),
            priority: record.priority().unwrap_or(PriorityLabel::Medium),
            assignee: config.assignee_label(),
            completed: false,
            completed_at: None,
            extracted_at: now,
        })
        .collect();

    if !items.is_empty() {
        log::debug!(
            "extract_actions: {} item(s) from {}",
            items.len(),
            record.id()
        );
    }
    items
}

/// Extract from every record, in corpus order. Not deduplicated.
pub fn extract_all(corpus: &Corpus, config: &EngineConfig, now: Timestamp) -> Vec<ActionItem> {
    let items: Vec<ActionItem> = corpus
        .iter()
        .flat_map(|record| extract_actions(record, config, now))
        .collect();
    log::debug!(
        "extract_all: {} raw action items from {} records",
        items.len(),
        corpus.len()
    );
    items
}

fn qualifies(
    record: &MessageRecord,
    config: &EngineConfig,
    sentence: &str,
    verb_alone: bool,
) -> bool {
    if matches!(record, MessageRecord::Email(_))
        && sentence.chars().count() <= MIN_EMAIL_SENTENCE_CHARS
    {
        return false;
    }

    let lower = sentence.to_lowercase();
    if !has_action_verb(&lower) {
        return false;
    }

    verb_alone || addresses_user(record, config, sentence, &lower)
}

fn addresses_user(
    record: &MessageRecord,
    config: &EngineConfig,
    sentence: &str,
    lower: &str,
) -> bool {
    if has_addressing_phrase(lower) {
        return true;
    }
    let mentions: &[String] = match record {
        MessageRecord::Channel(m) => &m.mentions,
        MessageRecord::Direct(m) => &m.mentions,
        MessageRecord::Email(_) | MessageRecord::Event(_) => &[],
    };
    config.is_mentioned(mentions, sentence)
}
