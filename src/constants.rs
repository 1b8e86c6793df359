//! Keyword catalogs and thresholds shared by the scorers, the extractor,
//! and the pattern detectors.

/// Words that push urgency up. Matched as lower-case substrings.
pub const URGENT_KEYWORDS: &[&str] = &[
    "urgent",
    "asap",
    "critical",
    "emergency",
    "blocker",
    "blocked",
    "immediately",
    "deadline",
    "eod",
    "today",
    "now",
    "help",
    "issue",
    "problem",
    "down",
    "error",
    "failed",
    "failure",
];

/// Business terms that push impact up. Matched as lower-case substrings.
pub const BUSINESS_KEYWORDS: &[&str] = &[
    "revenue", "client", "customer", "deal", "contract", "budget", "board", "investor",
];

/// Language that suggests the message reaches beyond one person.
pub const ORG_SCOPE_KEYWORDS: &[&str] =
    &["team", "department", "everyone", "all-hands", "company-wide"];

/// Sender markers treated as VIPs when the config does not override them.
pub const DEFAULT_VIP_MARKERS: &[&str] = &["ceo", "cto", "cfo", "president", "chairman"];

/// Client names whose email volume is tracked when the config does not override them.
pub const DEFAULT_CLIENT_MARKERS: &[&str] = &["acme", "globex", "initech", "umbrella"];

/// Verbs that make a sentence a candidate task. Matched as whole words.
pub const ACTION_VERBS: &[&str] = &[
    "review", "approve", "sign", "confirm", "respond", "reply", "answer", "schedule", "book",
    "arrange", "organize", "plan", "prepare", "complete", "finish", "submit", "send", "deliver",
    "provide", "update", "revise", "modify", "change", "fix", "resolve", "discuss", "call", "meet",
    "sync", "chat", "talk", "create", "write", "draft", "build", "develop", "implement", "check",
    "verify", "validate", "test", "investigate", "analyze",
];

/// Phrases that mean the sentence is directed at the reader.
pub const ADDRESSING_PHRASES: &[&str] = &["please", "can you", "could you", "need you"];

/// Email sentences this short are fragments, not tasks.
pub const MIN_EMAIL_SENTENCE_CHARS: usize = 20;

/// Hour of day (24h) used for every inferred deadline.
pub const DEADLINE_HOUR: u32 = 17;

/// Channel messages in the trailing week above which a spike is reported.
pub const SPIKE_MIN_MESSAGES: usize = 15;

/// Finance-topic messages in the trailing week needed to report a recurring topic.
pub const FINANCE_TOPIC_MIN_MESSAGES: usize = 3;

/// Client emails in the trailing week needed to report client intensity.
pub const CLIENT_EMAIL_MIN_MESSAGES: usize = 3;

/// Upcoming events in the leading week needed to report meeting overload.
pub const MEETING_OVERLOAD_MIN_EVENTS: usize = 8;

/// Width of the pattern detection window, in days.
pub const PATTERN_WINDOW_DAYS: i64 = 7;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_populated() {
        assert_eq!(URGENT_KEYWORDS.len(), 18);
        assert_eq!(BUSINESS_KEYWORDS.len(), 8);
        assert_eq!(ACTION_VERBS.len(), 43);
        assert!(!DEFAULT_VIP_MARKERS.is_empty());
        assert!(!DEFAULT_CLIENT_MARKERS.is_empty());
        assert_eq!(DEADLINE_HOUR, 17);
        assert_eq!(PATTERN_WINDOW_DAYS, 7);
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for kw in URGENT_KEYWORDS
            .iter()
            .chain(BUSINESS_KEYWORDS)
            .chain(ORG_SCOPE_KEYWORDS)
            .chain(ACTION_VERBS)
        {
            assert_eq!(*kw, kw.to_lowercase());
        }
    }
}
