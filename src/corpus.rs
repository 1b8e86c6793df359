//! The ordered set of records a pass runs over.
//!
//! Order matters: it is the tie-break for ranking and the "first seen" order
//! for action deduplication.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CorpusError;
use crate::types::{CalendarEvent, ChannelMessage, DirectMessage, EmailMessage, MessageRecord};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    records: Vec<MessageRecord>,
}

impl Corpus {
    pub fn new(records: Vec<MessageRecord>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of tagged records.
    pub fn from_json(raw: &str) -> Result<Self, CorpusError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        let content = fs::read_to_string(path).map_err(|source| CorpusError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let corpus = Self::from_json(&content)?;
        log::debug!(
            "Corpus::load: {} records from {}",
            corpus.len(),
            path.display()
        );
        Ok(corpus)
    }

    pub fn push(&mut self, record: MessageRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MessageRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[MessageRecord] {
        &self.records
    }

    /// First record with the given id.
    pub fn find(&self, id: &str) -> Option<&MessageRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Remove every record with the given id. Returns how many were removed.
    pub fn remove(&mut self, id: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        before - self.records.len()
    }

    pub fn channel_messages(&self) -> impl Iterator<Item = &ChannelMessage> {
        self.records.iter().filter_map(|r| match r {
            MessageRecord::Channel(m) => Some(m),
            _ => None,
        })
    }

    pub fn emails(&self) -> impl Iterator<Item = &EmailMessage> {
        self.records.iter().filter_map(|r| match r {
            MessageRecord::Email(m) => Some(m),
            _ => None,
        })
    }

    pub fn direct_messages(&self) -> impl Iterator<Item = &DirectMessage> {
        self.records.iter().filter_map(|r| match r {
            MessageRecord::Direct(m) => Some(m),
            _ => None,
        })
    }

    pub fn events(&self) -> impl Iterator<Item = &CalendarEvent> {
        self.records.iter().filter_map(|r| match r {
            MessageRecord::Event(e) => Some(e),
            _ => None,
        })
    }
}

impl FromIterator<MessageRecord> for Corpus {
    fn from_iter<I: IntoIterator<Item = MessageRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a MessageRecord;
    type IntoIter = std::slice::Iter<'a, MessageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordKind;

    const SAMPLE: &str = r#"[
        {"kind": "channel", "id": "t-1", "channel": "Engineering", "author": "Sam",
         "content": "Build is red", "timestamp": "2026-03-10T08:00:00-05:00"},
        {"kind": "email", "id": "e-1", "fromName": "Dana", "subject": "Renewal",
         "timestamp": "2026-03-10T07:00:00-05:00", "priority": "high"},
        {"kind": "direct", "id": "w-1", "chatName": "Leadership", "sender": "Priya",
         "content": "Call me", "timestamp": "2026-03-10T06:00:00-05:00"},
        {"kind": "event", "id": "c-1", "title": "QBR", "organizer": "Dana",
         "startTime": "2026-03-11T10:00:00-05:00", "endTime": "2026-03-11T11:00:00-05:00",
         "timestamp": "2026-03-01T10:00:00-05:00"}
    ]"#;

    #[test]
    fn test_from_json_preserves_order_and_kinds() {
        let corpus = Corpus::from_json(SAMPLE).unwrap();
        let kinds: Vec<RecordKind> = corpus.iter().map(|r| r.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                RecordKind::Channel,
                RecordKind::Email,
                RecordKind::Direct,
                RecordKind::Event
            ]
        );
        assert_eq!(corpus.channel_messages().count(), 1);
        assert_eq!(corpus.emails().count(), 1);
        assert_eq!(corpus.direct_messages().count(), 1);
        assert_eq!(corpus.events().count(), 1);
    }

    #[test]
    fn test_find_and_remove() {
        let mut corpus = Corpus::from_json(SAMPLE).unwrap();
        assert_eq!(corpus.find("e-1").map(|r| r.id()), Some("e-1"));
        assert!(corpus.find("nope").is_none());
        assert_eq!(corpus.remove("e-1"), 1);
        assert!(corpus.find("e-1").is_none());
        assert_eq!(corpus.len(), 3);
    }

    #[test]
    fn test_empty_corpus() {
        let corpus = Corpus::from_json("[]").unwrap();
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_load_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = Corpus::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, CorpusError::Read { .. }));
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("corpus.json");
        fs::write(&path, r#"[{"kind": "fax"}]"#).unwrap();
        assert!(matches!(Corpus::load(&path), Err(CorpusError::Parse(_))));
    }
}
