//! Dev tools: a synthetic executive inbox for demo runs and end-to-end tests.
//!
//! The fixture is a JSON template with relative time tokens (`{{NOW}}`,
//! `{{NOW-20m}}`, `{{NOW+1d+1h}}`) resolved against the caller's `now`, so the
//! sample always looks fresh and every pass over it is reproducible.

use std::sync::OnceLock;

use chrono::Duration;
use regex::{Captures, Regex};

use crate::corpus::Corpus;
use crate::error::CorpusError;
use crate::types::Timestamp;

// Fixture template embedded at compile time
const SAMPLE_CORPUS_TMPL: &str = include_str!("fixtures/sample_corpus.json.tmpl");

fn re_time_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{NOW((?:[+-]\d+[mhd])*)\}\}").unwrap())
}

fn re_offset() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([+-])(\d+)([mhd])").unwrap())
}

/// Build the sample corpus with timestamps relative to `now`.
pub fn sample_corpus(now: Timestamp) -> Result<Corpus, CorpusError> {
    let corpus = Corpus::from_json(&patch_times(SAMPLE_CORPUS_TMPL, now))?;
    log::debug!("sample_corpus: {} records", corpus.len());
    Ok(corpus)
}

/// Replace relative time tokens in a template with RFC 3339 instants.
pub(crate) fn patch_times(template: &str, now: Timestamp) -> String {
    re_time_token()
        .replace_all(template, |caps: &Captures| {
            let offset = re_offset()
                .captures_iter(&caps[1])
                .map(|c| {
                    let amount: i64 = c[2].parse().unwrap_or(0);
                    let span = match &c[3] {
                        "m" => Duration::minutes(amount),
                        "h" => Duration::hours(amount),
                        _ => Duration::days(amount),
                    };
                    if &c[1] == "-" {
                        -span
                    } else {
                        span
                    }
                })
                .fold(Duration::zero(), |acc, d| acc + d);
            (now + offset).to_rfc3339()
        })
        .into_owned()
}
