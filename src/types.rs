use std::collections::BTreeSet;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

/// Every instant the engine sees. "Local" means the offset carried by `now`.
pub type Timestamp = DateTime<FixedOffset>;

// ---------------------------------------------------------------------------
// Priority labels
// ---------------------------------------------------------------------------

/// Coarse priority assigned by the author or the source system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLabel {
    Low,
    Medium,
    High,
    Urgent,
}

impl PriorityLabel {
    /// Ordinal used for action sorting: urgent=4 … low=1.
    pub fn rank(self) -> u8 {
        match self {
            PriorityLabel::Urgent => 4,
            PriorityLabel::High => 3,
            PriorityLabel::Medium => 2,
            PriorityLabel::Low => 1,
        }
    }

    /// Urgency base points. Records without a label get 10.
    pub fn base_urgency(label: Option<Self>) -> u32 {
        match label {
            Some(PriorityLabel::Urgent) => 40,
            Some(PriorityLabel::High) => 30,
            Some(PriorityLabel::Medium) => 15,
            Some(PriorityLabel::Low) => 5,
            None => 10,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PriorityLabel::Urgent => "urgent",
            PriorityLabel::High => "high",
            PriorityLabel::Medium => "medium",
            PriorityLabel::Low => "low",
        }
    }

    /// Parse a label from free text. Unrecognised values yield `None`.
    pub fn from_str_lossy(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "urgent" | "critical" => Some(PriorityLabel::Urgent),
            "high" => Some(PriorityLabel::High),
            "medium" | "normal" => Some(PriorityLabel::Medium),
            "low" => Some(PriorityLabel::Low),
            _ => None,
        }
    }
}

impl std::fmt::Display for PriorityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn lossy_priority<'de, D>(deserializer: D) -> Result<Option<PriorityLabel>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(PriorityLabel::from_str_lossy))
}

// ---------------------------------------------------------------------------
// Message records
// ---------------------------------------------------------------------------

/// A message posted in a team chat channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelMessage {
    pub id: String,
    pub channel: String,
    pub author: String,
    pub content: String,
    pub timestamp: Timestamp,
    #[serde(default, deserialize_with = "lossy_priority")]
    pub priority: Option<PriorityLabel>,
    #[serde(default)]
    pub mentions: Vec<String>,
    #[serde(default)]
    pub has_action_items: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Timestamp>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailMessage {
    pub id: String,
    pub from_name: String,
    #[serde(default)]
    pub from_address: String,
    #[serde(default)]
    pub to: Vec<String>,
    pub subject: String,
    #[serde(default)]
    pub body: String,
    pub timestamp: Timestamp,
    #[serde(default, deserialize_with = "lossy_priority")]
    pub priority: Option<PriorityLabel>,
    /// Sender or mail client flagged the whole message as needing action.
    #[serde(default)]
    pub action_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Timestamp>,
}

impl EmailMessage {
    /// Explicit flag, or "action required" / "to-do" anywhere in the message.
    pub fn is_flagged_for_action(&self) -> bool {
        if self.action_required {
            return true;
        }
        let text = format!("{} {}", self.subject, self.body).to_lowercase();
        ["action required", "to-do", "todo"]
            .iter()
            .any(|flag| text.contains(flag))
    }

    /// "Name <address>" style sender string used for VIP and client matching.
    pub fn sender(&self) -> String {
        if self.from_address.is_empty() {
            self.from_name.clone()
        } else {
            format!("{} <{}>", self.from_name, self.from_address)
        }
    }
}

/// A one-to-one or small-group instant message thread entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectMessage {
    pub id: String,
    pub chat_name: String,
    pub sender: String,
    pub content: String,
    pub timestamp: Timestamp,
    #[serde(default, deserialize_with = "lossy_priority")]
    pub priority: Option<PriorityLabel>,
    #[serde(default)]
    pub mentions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Timestamp>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub organizer: String,
    #[serde(default)]
    pub attendees: Vec<String>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    /// When the invite was created or last updated.
    pub timestamp: Timestamp,
    #[serde(default, deserialize_with = "lossy_priority")]
    pub priority: Option<PriorityLabel>,
    #[serde(default)]
    pub has_action_items: bool,
    #[serde(default)]
    pub requires_prep: bool,
}

/// Which of the four record shapes a record is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Channel,
    Email,
    Direct,
    Event,
}

impl RecordKind {
    /// Product name shown in front of every source label.
    pub fn source_prefix(self) -> &'static str {
        match self {
            RecordKind::Channel => "Teams",
            RecordKind::Email => "Email",
            RecordKind::Direct => "WhatsApp",
            RecordKind::Event => "Calendar",
        }
    }
}

/// One communication record. The variant decides scoring weights and
/// extraction rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageRecord {
    Channel(ChannelMessage),
    Email(EmailMessage),
    Direct(DirectMessage),
    Event(CalendarEvent),
}

impl MessageRecord {
    pub fn id(&self) -> &str {
        match self {
            MessageRecord::Channel(m) => &m.id,
            MessageRecord::Email(m) => &m.id,
            MessageRecord::Direct(m) => &m.id,
            MessageRecord::Event(e) => &e.id,
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            MessageRecord::Channel(_) => RecordKind::Channel,
            MessageRecord::Email(_) => RecordKind::Email,
            MessageRecord::Direct(_) => RecordKind::Direct,
            MessageRecord::Event(_) => RecordKind::Event,
        }
    }

    /// Free text used for keyword scoring and extraction.
    pub fn content(&self) -> String {
        match self {
            MessageRecord::Channel(m) => m.content.clone(),
            MessageRecord::Email(m) => format!("{}\n{}", m.subject, m.body),
            MessageRecord::Direct(m) => m.content.clone(),
            MessageRecord::Event(e) if e.description.is_empty() => e.title.clone(),
            MessageRecord::Event(e) => format!("{}\n{}", e.title, e.description),
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        match self {
            MessageRecord::Channel(m) => m.timestamp,
            MessageRecord::Email(m) => m.timestamp,
            MessageRecord::Direct(m) => m.timestamp,
            MessageRecord::Event(e) => e.timestamp,
        }
    }

    pub fn priority(&self) -> Option<PriorityLabel> {
        match self {
            MessageRecord::Channel(m) => m.priority,
            MessageRecord::Email(m) => m.priority,
            MessageRecord::Direct(m) => m.priority,
            MessageRecord::Event(e) => e.priority,
        }
    }

    /// Identity string used for VIP matching.
    pub fn sender(&self) -> String {
        match self {
            MessageRecord::Channel(m) => m.author.clone(),
            MessageRecord::Email(m) => m.sender(),
            MessageRecord::Direct(m) => m.sender.clone(),
            MessageRecord::Event(e) => e.organizer.clone(),
        }
    }

    /// Deadline carried by the record. Events use their start time.
    pub fn due_date(&self) -> Option<Timestamp> {
        match self {
            MessageRecord::Channel(m) => m.due_date,
            MessageRecord::Email(m) => m.due_date,
            MessageRecord::Direct(m) => m.due_date,
            MessageRecord::Event(e) => Some(e.start_time),
        }
    }

    /// Human label, e.g. "Teams - Engineering" or "Email from Jennifer Brooks".
    pub fn source_label(&self) -> String {
        let prefix = self.kind().source_prefix();
        match self {
            MessageRecord::Channel(m) => format!("{} - {}", prefix, m.channel),
            MessageRecord::Email(m) => format!("{} from {}", prefix, m.from_name),
            MessageRecord::Direct(m) => format!("{} - {}", prefix, m.chat_name),
            MessageRecord::Event(e) => format!("{} - {}", prefix, e.title),
        }
    }
}

// ---------------------------------------------------------------------------
// Derived outputs
// ---------------------------------------------------------------------------

/// How much weight the sender carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StakeholderImportance {
    High,
    Medium,
    Low,
}

/// Explainability breakdown shown next to a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreFactors {
    pub has_deadline: bool,
    pub mentions_user: bool,
    #[serde(rename = "fromVIP")]
    pub from_vip: bool,
    pub has_action_items: bool,
    pub stakeholder_importance: StakeholderImportance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_to_deadline_hours: Option<f64>,
}

/// Score for one record in one ranking pass. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityScore {
    pub record_id: String,
    pub urgency_score: u8,
    pub impact_score: u8,
    pub overall_score: f64,
    pub factors: ScoreFactors,
}

/// Flattened item the dashboard renders in its priority list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: PriorityLabel,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Timestamp>,
    pub score: f64,
}

/// A task pulled out of a single sentence of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub id: String,
    pub description: String,
    pub source: String,
    /// Lookup only; the record may have gone away since extraction.
    pub source_message_id: String,
    pub priority: PriorityLabel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Timestamp>,
    pub assignee: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
    pub extracted_at: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    CommunicationSpike,
    RecurringTopic,
    WorkloadImbalance,
}

impl PatternType {
    pub fn as_str(self) -> &'static str {
        match self {
            PatternType::CommunicationSpike => "communication_spike",
            PatternType::RecurringTopic => "recurring_topic",
            PatternType::WorkloadImbalance => "workload_imbalance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeframe {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl Timeframe {
    pub fn contains(&self, at: Timestamp) -> bool {
        at >= self.start && at <= self.end
    }
}

/// A communication pattern found over the trailing or leading week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    pub id: String,
    #[serde(rename = "type")]
    pub pattern_type: PatternType,
    pub description: String,
    pub frequency: usize,
    pub affected_channels: BTreeSet<String>,
    pub timeframe: Timeframe,
    pub recommendation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_priority_rank_order() {
        assert!(PriorityLabel::Urgent.rank() > PriorityLabel::High.rank());
        assert!(PriorityLabel::High.rank() > PriorityLabel::Medium.rank());
        assert!(PriorityLabel::Medium.rank() > PriorityLabel::Low.rank());
    }

    #[test]
    fn test_base_urgency_default_for_missing_label() {
        assert_eq!(PriorityLabel::base_urgency(None), 10);
        assert_eq!(PriorityLabel::base_urgency(Some(PriorityLabel::Urgent)), 40);
        assert_eq!(PriorityLabel::base_urgency(Some(PriorityLabel::Low)), 5);
    }

    #[test]
    fn test_record_deserializes_by_kind_tag() {
        let json = r#"{
            "kind": "channel",
            "id": "t-1",
            "channel": "Engineering",
            "author": "Sam Patel",
            "content": "Deploy is blocked",
            "timestamp": "2026-03-10T09:00:00-05:00",
            "priority": "high",
            "mentions": ["alex"]
        }"#;
        let record: MessageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind(), RecordKind::Channel);
        assert_eq!(record.id(), "t-1");
        assert_eq!(record.priority(), Some(PriorityLabel::High));
        assert_eq!(record.source_label(), "Teams - Engineering");
    }

    #[test]
    fn test_unknown_priority_label_becomes_none() {
        let json = r#"{
            "kind": "direct",
            "id": "w-1",
            "chatName": "Family",
            "sender": "Mom",
            "content": "Call me",
            "timestamp": "2026-03-10T09:00:00-05:00",
            "priority": "whenever"
        }"#;
        let record: MessageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.priority(), None);
        assert_eq!(record.source_label(), "WhatsApp - Family");
    }

    #[test]
    fn test_email_flag_detection() {
        let email = EmailMessage {
            id: "e-1".to_string(),
            from_name: "Dana".to_string(),
            from_address: "dana@acme.com".to_string(),
            to: vec![],
            subject: "ACTION REQUIRED: sign the renewal".to_string(),
            body: String::new(),
            timestamp: ts("2026-03-10T09:00:00Z"),
            priority: None,
            action_required: false,
            due_date: None,
        };
        assert!(email.is_flagged_for_action());
        assert_eq!(email.sender(), "Dana <dana@acme.com>");
    }

    #[test]
    fn test_event_content_and_due_date() {
        let event = MessageRecord::Event(CalendarEvent {
            id: "c-1".to_string(),
            title: "Board prep".to_string(),
            description: String::new(),
            organizer: "Chief of Staff".to_string(),
            attendees: vec![],
            start_time: ts("2026-03-11T10:00:00Z"),
            end_time: ts("2026-03-11T11:00:00Z"),
            timestamp: ts("2026-03-01T10:00:00Z"),
            priority: Some(PriorityLabel::High),
            has_action_items: true,
            requires_prep: true,
        });
        assert_eq!(event.content(), "Board prep");
        assert_eq!(event.due_date(), Some(ts("2026-03-11T10:00:00Z")));
        assert_eq!(event.source_label(), "Calendar - Board prep");
    }

    #[test]
    fn test_timeframe_contains_is_inclusive() {
        let frame = Timeframe {
            start: ts("2026-03-03T12:00:00Z"),
            end: ts("2026-03-10T12:00:00Z"),
        };
        assert!(frame.contains(ts("2026-03-03T12:00:00Z")));
        assert!(frame.contains(ts("2026-03-10T12:00:00Z")));
        assert!(!frame.contains(ts("2026-03-10T12:00:01Z")));
    }
}
