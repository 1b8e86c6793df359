//! Sentence splitting and cue detection for action extraction.
//!
//! Deliberately simple: punctuation and line breaks, no NLP.

use std::sync::OnceLock;

use regex::Regex;

use crate::constants::{ACTION_VERBS, ADDRESSING_PHRASES};

// Sentence terminator followed by whitespace or end of text, or a line break.
fn re_sentence_break() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+(?:\s+|$)|\n\s*").unwrap())
}

fn re_action_verb() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let alternation = ACTION_VERBS.join("|");
        Regex::new(&format!(r"\b(?:{})\b", alternation)).unwrap()
    })
}

/// Split text into trimmed, non-empty sentences in reading order.
pub fn split_sentences(text: &str) -> Vec<String> {
    re_sentence_break()
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whole-word action verb anywhere in the (lower-cased) sentence.
pub fn has_action_verb(lower: &str) -> bool {
    re_action_verb().is_match(lower)
}

/// "please", "can you", "could you", "need you".
pub fn has_addressing_phrase(lower: &str) -> bool {
    ADDRESSING_PHRASES.iter().any(|p| lower.contains(p))
}
