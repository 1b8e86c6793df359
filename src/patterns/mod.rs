//! Communication pattern detection.
//!
//! A fixed table of detectors runs over the corpus in order. Each looks at
//! either the trailing week (messages) or the leading week (meetings) around
//! `now` and emits at most one pattern. Output order is table order.

pub mod detectors;

use chrono::Duration;

use crate::config::EngineConfig;
use crate::constants::PATTERN_WINDOW_DAYS;
use crate::corpus::Corpus;
use crate::types::{Pattern, PatternType, Timeframe, Timestamp};
use crate::util::fingerprint;

/// Context passed to each detector.
pub struct DetectorContext<'a> {
    pub now: Timestamp,
    pub config: &'a EngineConfig,
}

impl DetectorContext<'_> {
    /// `[now - 7d, now]`
    pub fn trailing_week(&self) -> Timeframe {
        Timeframe {
            start: self.now - Duration::days(PATTERN_WINDOW_DAYS),
            end: self.now,
        }
    }

    /// `[now, now + 7d]`. Detectors decide whether `now` itself counts.
    pub fn leading_week(&self) -> Timeframe {
        Timeframe {
            start: self.now,
            end: self.now + Duration::days(PATTERN_WINDOW_DAYS),
        }
    }
}

/// Function signature for a pattern detector.
pub type DetectorFn = fn(&Corpus, &DetectorContext) -> Option<Pattern>;

/// A named detector in the fixed catalog.
pub struct DetectorEntry {
    pub name: &'static str,
    pub detector: DetectorFn,
}

/// Evaluation order is part of the output contract.
pub const DETECTORS: &[DetectorEntry] = &[
    DetectorEntry {
        name: "communication_spike",
        detector: detectors::detect_communication_spike,
    },
    DetectorEntry {
        name: "finance_topic",
        detector: detectors::detect_finance_topic,
    },
    DetectorEntry {
        name: "client_intensity",
        detector: detectors::detect_client_intensity,
    },
    DetectorEntry {
        name: "meeting_overload",
        detector: detectors::detect_meeting_overload,
    },
];

/// Run every detector against the corpus. Zero to four patterns.
pub fn detect_patterns(corpus: &Corpus, config: &EngineConfig, now: Timestamp) -> Vec<Pattern> {
    let ctx = DetectorContext { now, config };
    let patterns: Vec<Pattern> = DETECTORS
        .iter()
        .filter_map(|entry| {
            let found = (entry.detector)(corpus, &ctx);
            if let Some(ref pattern) = found {
                log::debug!(
                    "detect_patterns: {} fired (frequency {})",
                    entry.name,
                    pattern.frequency
                );
            }
            found
        })
        .collect();
    log::debug!("detect_patterns: {} pattern(s)", patterns.len());
    patterns
}

/// Stable id from the pattern type, its topic, and the window start date.
pub(crate) fn pattern_id(pattern_type: PatternType, topic: &str, window: &Timeframe) -> String {
    let start = window.start.format("%Y-%m-%d").to_string();
    let fp = fingerprint(&[pattern_type.as_str(), topic, &start]);
    format!("pattern-{}", &fp[..16])
}
