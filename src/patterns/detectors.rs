//! The four built-in pattern detectors.

use std::collections::BTreeSet;

use crate::constants::{
    CLIENT_EMAIL_MIN_MESSAGES, FINANCE_TOPIC_MIN_MESSAGES, MEETING_OVERLOAD_MIN_EVENTS,
    SPIKE_MIN_MESSAGES,
};
use crate::corpus::Corpus;
use crate::types::{MessageRecord, Pattern, PatternType};

use super::{pattern_id, DetectorContext};

const FINANCE_TOPIC_TERMS: &[&str] = &["finance", "budget"];

// ---------------------------------------------------------------------------
// Detector 1: Communication spike
// ---------------------------------------------------------------------------

/// More than 15 channel messages in the trailing week.
pub fn detect_communication_spike(corpus: &Corpus, ctx: &DetectorContext) -> Option<Pattern> {
    let window = ctx.trailing_week();
    let recent: Vec<&str> = corpus
        .channel_messages()
        .filter(|m| window.contains(m.timestamp))
        .map(|m| m.channel.as_str())
        .collect();

    if recent.len() <= SPIKE_MIN_MESSAGES {
        return None;
    }

    let channels: BTreeSet<String> = recent.iter().map(|c| c.to_string()).collect();
    Some(Pattern {
        id: pattern_id(PatternType::CommunicationSpike, "channels", &window),
        pattern_type: PatternType::CommunicationSpike,
        description: format!(
            "{} channel messages in the last 7 days across {} channel(s)",
            recent.len(),
            channels.len()
        ),
        frequency: recent.len(),
        affected_channels: channels,
        timeframe: window,
        recommendation: "Batch channel responses into two or three set times a day instead of \
                         answering each message as it lands."
            .to_string(),
    })
}

// ---------------------------------------------------------------------------
// Detector 2: Recurring finance topic
// ---------------------------------------------------------------------------

/// Three or more messages in the trailing week posted in a finance channel
/// or talking about finance or budget.
pub fn detect_finance_topic(corpus: &Corpus, ctx: &DetectorContext) -> Option<Pattern> {
    let window = ctx.trailing_week();
    let matching: Vec<&MessageRecord> = corpus
        .iter()
        .filter(|r| !matches!(r, MessageRecord::Event(_)))
        .filter(|r| window.contains(r.timestamp()))
        .filter(|r| is_finance_related(r))
        .collect();

    if matching.len() < FINANCE_TOPIC_MIN_MESSAGES {
        return None;
    }

    Some(Pattern {
        id: pattern_id(PatternType::RecurringTopic, "finance", &window),
        pattern_type: PatternType::RecurringTopic,
        description: format!(
            "Finance and budget came up in {} messages over the last 7 days",
            matching.len()
        ),
        frequency: matching.len(),
        affected_channels: source_names(&matching),
        timeframe: window,
        recommendation: "Block a recurring slot to review finance and budget threads together."
            .to_string(),
    })
}

fn is_finance_related(record: &MessageRecord) -> bool {
    let venue = match record {
        MessageRecord::Channel(m) => m.channel.to_lowercase(),
        MessageRecord::Direct(m) => m.chat_name.to_lowercase(),
        _ => String::new(),
    };
    if venue.contains("finance") {
        return true;
    }
    let content = record.content().to_lowercase();
    FINANCE_TOPIC_TERMS.iter().any(|t| content.contains(t))
}

// ---------------------------------------------------------------------------
// Detector 3: Client communication intensity
// ---------------------------------------------------------------------------

/// Three or more emails from client senders in the trailing week.
pub fn detect_client_intensity(corpus: &Corpus, ctx: &DetectorContext) -> Option<Pattern> {
    let window = ctx.trailing_week();
    let senders: Vec<String> = corpus
        .emails()
        .filter(|m| window.contains(m.timestamp))
        .filter(|m| ctx.config.is_client(&m.sender()))
        .map(|m| m.from_name.clone())
        .collect();

    if senders.len() < CLIENT_EMAIL_MIN_MESSAGES {
        return None;
    }

    let affected: BTreeSet<String> = senders
        .iter()
        .map(|name| format!("Email from {}", name))
        .collect();
    Some(Pattern {
        id: pattern_id(PatternType::RecurringTopic, "client", &window),
        pattern_type: PatternType::RecurringTopic,
        description: format!(
            "{} client emails in the last 7 days from {} sender(s)",
            senders.len(),
            affected.len()
        ),
        frequency: senders.len(),
        affected_channels: affected,
        timeframe: window,
        recommendation: "Delegate routine client communications and keep the strategic threads \
                         for yourself."
            .to_string(),
    })
}

// ---------------------------------------------------------------------------
// Detector 4: Meeting overload
// ---------------------------------------------------------------------------

/// Eight or more meetings starting within the leading week.
pub fn detect_meeting_overload(corpus: &Corpus, ctx: &DetectorContext) -> Option<Pattern> {
    let window = ctx.leading_week();
    let upcoming: Vec<&str> = corpus
        .events()
        .filter(|e| e.start_time > window.start && e.start_time <= window.end)
        .map(|e| e.title.as_str())
        .collect();

    if upcoming.len() < MEETING_OVERLOAD_MIN_EVENTS {
        return None;
    }

    Some(Pattern {
        id: pattern_id(PatternType::WorkloadImbalance, "meetings", &window),
        pattern_type: PatternType::WorkloadImbalance,
        description: format!("{} meetings scheduled in the next 7 days", upcoming.len()),
        frequency: upcoming.len(),
        affected_channels: BTreeSet::from(["Calendar".to_string()]),
        timeframe: window,
        recommendation: "Block focus time on the calendar before the week fills up.".to_string(),
    })
}

fn source_names(records: &[&MessageRecord]) -> BTreeSet<String> {
    records
        .iter()
        .map(|r| match r {
            MessageRecord::Channel(m) => m.channel.clone(),
            _ => r.source_label(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::patterns::DetectorFn;
    use crate::test_utils::{channel, config, direct, email, event, now, record_channel};
    use crate::types::Timeframe;
    use chrono::Duration;

    fn run(detector: DetectorFn, corpus: &Corpus) -> Option<Pattern> {
        run_with(detector, corpus, &config())
    }

    fn run_with(
        detector: DetectorFn,
        corpus: &Corpus,
        config: &EngineConfig,
    ) -> Option<Pattern> {
        let ctx = DetectorContext { now: now(), config };
        detector(corpus, &ctx)
    }

    fn channels(n: usize, age: Duration) -> Corpus {
        (0..n)
            .map(|i| {
                let mut m = channel(&format!("t-{}", i), "Engineering", "Standup notes");
                m.timestamp = now() - age;
                MessageRecord::Channel(m)
            })
            .collect()
    }

    #[test]
    fn test_spike_threshold_is_strict() {
        assert!(run(detect_communication_spike, &channels(15, Duration::days(1))).is_none());
        let pattern = run(detect_communication_spike, &channels(16, Duration::days(1))).unwrap();
        assert_eq!(pattern.frequency, 16);
        assert_eq!(pattern.timeframe.end, now());
    }

    #[test]
    fn test_spike_ignores_old_messages() {
        assert!(run(detect_communication_spike, &channels(30, Duration::days(8))).is_none());
    }

    #[test]
    fn test_spike_window_edge_is_inclusive() {
        let pattern = run(detect_communication_spike, &channels(16, Duration::days(7))).unwrap();
        assert_eq!(pattern.frequency, 16);
    }

    #[test]
    fn test_finance_by_channel_or_keyword() {
        let corpus: Corpus = vec![
            record_channel("t-1", "Finance", "Numbers posted"),
            MessageRecord::Email(email("e-1", "Dana", "Budget", "See attached.")),
            MessageRecord::Direct(direct("w-1", "Leadership", "Finance review moved")),
            record_channel("t-2", "Random", "Lunch menu"),
        ]
        .into_iter()
        .collect();
        let pattern = run(detect_finance_topic, &corpus).unwrap();
        assert_eq!(pattern.pattern_type, PatternType::RecurringTopic);
        assert_eq!(pattern.frequency, 3);
        assert!(pattern.affected_channels.contains("Finance"));
        assert!(pattern.affected_channels.contains("Email from Dana"));
        assert!(pattern.affected_channels.contains("WhatsApp - Leadership"));
    }

    #[test]
    fn test_finance_needs_three() {
        let corpus: Corpus = vec![
            record_channel("t-1", "Finance", "Numbers posted"),
            record_channel("t-2", "Finance", "Numbers posted"),
        ]
        .into_iter()
        .collect();
        assert!(run(detect_finance_topic, &corpus).is_none());
    }

    #[test]
    fn test_finance_skips_events() {
        let mut records: Vec<MessageRecord> = (0..3)
            .map(|i| {
                let mut e = event(&format!("c-{}", i), "Budget review", Duration::hours(2));
                e.timestamp = now() - Duration::hours(1);
                MessageRecord::Event(e)
            })
            .collect();
        records.push(record_channel("t-1", "Finance", "Numbers posted"));
        let corpus: Corpus = records.into_iter().collect();
        assert!(run(detect_finance_topic, &corpus).is_none());
    }

    #[test]
    fn test_client_intensity() {
        let corpus: Corpus = vec![
            MessageRecord::Email(email("e-1", "Dana at Acme", "Renewal", "Following up.")),
            MessageRecord::Email(email("e-2", "Pat (Globex)", "QBR", "Agenda attached.")),
            MessageRecord::Email(email("e-3", "Dana at Acme", "Renewal", "One more thing.")),
            MessageRecord::Email(email("e-4", "Sam Patel", "Lunch", "Tacos?")),
        ]
        .into_iter()
        .collect();
        let pattern = run(detect_client_intensity, &corpus).unwrap();
        assert_eq!(pattern.frequency, 3);
        assert_eq!(pattern.affected_channels.len(), 2);
        assert!(pattern.recommendation.starts_with("Delegate"));
    }

    #[test]
    fn test_client_markers_come_from_config() {
        let corpus: Corpus = (0..3)
            .map(|i| {
                MessageRecord::Email(email(&format!("e-{}", i), "Lee at Northwind", "Hi", "Hello."))
            })
            .collect();
        assert!(run(detect_client_intensity, &corpus).is_none());

        let cfg = EngineConfig {
            client_markers: vec!["northwind".to_string()],
            ..config()
        };
        assert!(run_with(detect_client_intensity, &corpus, &cfg).is_some());
    }

    #[test]
    fn test_meeting_overload_counts_leading_week_only() {
        let mut records: Vec<MessageRecord> = (0..7)
            .map(|i| {
                MessageRecord::Event(event(&format!("c-{}", i), "Sync", Duration::hours(1 + i)))
            })
            .collect();
        // Past and far-future meetings do not count
        records.push(MessageRecord::Event(event("past", "Sync", Duration::hours(-3))));
        records.push(MessageRecord::Event(event("far", "Sync", Duration::days(9))));
        let corpus: Corpus = records.into_iter().collect();
        assert!(run(detect_meeting_overload, &corpus).is_none());

        let mut corpus = corpus;
        corpus.push(MessageRecord::Event(event("c-7", "Sync", Duration::days(7))));
        let pattern = run(detect_meeting_overload, &corpus).unwrap();
        assert_eq!(pattern.pattern_type, PatternType::WorkloadImbalance);
        assert_eq!(pattern.frequency, 8);
        assert_eq!(pattern.timeframe.start, now());
    }

    #[test]
    fn test_meeting_starting_now_is_not_future() {
        let corpus: Corpus = (0..8)
            .map(|i| MessageRecord::Event(event(&format!("c-{}", i), "Sync", Duration::zero())))
            .collect();
        assert!(run(detect_meeting_overload, &corpus).is_none());
    }

    #[test]
    fn test_window_timeframe_brackets_now() {
        let pattern = run(detect_communication_spike, &channels(20, Duration::hours(3))).unwrap();
        let expected = Timeframe {
            start: now() - Duration::days(7),
            end: now(),
        };
        assert_eq!(pattern.timeframe, expected);
    }
}
