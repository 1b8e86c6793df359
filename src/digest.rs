//! One full analysis pass: top priorities, consolidated actions, patterns.
//!
//! This is what a host (dashboard, LLM context builder) consumes. The pass
//! is a pure function of the corpus, the config and `now`; the completion
//! ledger is the only input that carries user state.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::corpus::Corpus;
use crate::dedup::consolidate;
use crate::extract::extract_all;
use crate::patterns::detect_patterns;
use crate::ranking::top_priorities;
use crate::store::CompletionLedger;
use crate::types::{ActionItem, Pattern, PriorityItem, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Digest {
    pub generated_at: Timestamp,
    pub priorities: Vec<PriorityItem>,
    pub actions: Vec<ActionItem>,
    pub patterns: Vec<Pattern>,
}

impl Digest {
    /// Actions the user has not ticked off yet.
    pub fn open_actions(&self) -> impl Iterator<Item = &ActionItem> {
        self.actions.iter().filter(|a| !a.completed)
    }
}

pub fn build_digest(corpus: &Corpus, config: &EngineConfig, now: Timestamp) -> Digest {
    let priorities = top_priorities(corpus, config, now, config.top_n);
    let actions = consolidate(extract_all(corpus, config, now));
    let patterns = detect_patterns(corpus, config, now);

    log::info!(
        "build_digest: {} records -> {} priorities, {} actions, {} patterns",
        corpus.len(),
        priorities.len(),
        actions.len(),
        patterns.len()
    );

    Digest {
        generated_at: now,
        priorities,
        actions,
        patterns,
    }
}

/// Same as [`build_digest`], with completion state applied to the actions.
pub fn build_digest_with_ledger(
    corpus: &Corpus,
    config: &EngineConfig,
    now: Timestamp,
    ledger: &CompletionLedger,
) -> Digest {
    let mut digest = build_digest(corpus, config, now);
    ledger.apply(&mut digest.actions);
    digest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{config, email, event, now, record_channel};
    use crate::types::{MessageRecord, PriorityLabel};
    use chrono::Duration;

    fn corpus() -> Corpus {
        let mut urgent = email(
            "e-1",
            "Jennifer Brooks (CEO)",
            "Board deck",
            "Can you send the board deck by EOD? The $500K contract is on the agenda.",
        );
        urgent.priority = Some(PriorityLabel::Urgent);
        urgent.timestamp = now() - Duration::minutes(20);
        vec![
            record_channel("t-1", "Product", "Can you review the proposal by tomorrow?"),
            MessageRecord::Email(urgent),
            record_channel("t-2", "Random", "Lunch menu attached"),
            MessageRecord::Event(event("c-1", "QBR with Globex", Duration::hours(3))),
            record_channel("t-3", "Product", "can you review the proposal"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_empty_corpus_gives_empty_digest() {
        let digest = build_digest(&Corpus::default(), &config(), now());
        assert!(digest.priorities.is_empty());
        assert!(digest.actions.is_empty());
        assert!(digest.patterns.is_empty());
        assert_eq!(digest.generated_at, now());
    }

    #[test]
    fn test_digest_sections() {
        let digest = build_digest(&corpus(), &config(), now());
        assert_eq!(digest.priorities.len(), 5);
        assert_eq!(digest.priorities[0].id, "e-1");

        // t-3 repeats t-1 and is dropped; the urgent email action sorts first
        let ids: Vec<&str> = digest.actions.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["e-1-action-1", "t-1-action-0"]);
        assert!(digest.patterns.is_empty());
    }

    #[test]
    fn test_top_n_from_config() {
        let cfg = EngineConfig {
            top_n: 2,
            ..config()
        };
        let digest = build_digest(&corpus(), &cfg, now());
        assert_eq!(digest.priorities.len(), 2);
    }

    #[test]
    fn test_digest_is_deterministic() {
        let first = build_digest(&corpus(), &config(), now());
        let second = build_digest(&corpus(), &config(), now());
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_ledger_marks_completed_actions() {
        let mut ledger = CompletionLedger::default();
        ledger.mark_completed("t-1-action-0", now());

        let digest = build_digest_with_ledger(&corpus(), &config(), now(), &ledger);
        let done = digest
            .actions
            .iter()
            .find(|a| a.id == "t-1-action-0")
            .unwrap();
        assert!(done.completed);
        assert_eq!(done.completed_at, Some(now()));
        assert_eq!(digest.open_actions().count(), 1);
    }

    #[test]
    fn test_digest_serializes_camel_case() {
        let digest = build_digest(&corpus(), &config(), now());
        let json = serde_json::to_value(&digest).unwrap();
        assert!(json.get("generatedAt").is_some());
        assert!(json["actions"][0].get("sourceMessageId").is_some());
    }
}
