//! Record builders shared by unit tests.

use chrono::{DateTime, Duration};

use crate::config::EngineConfig;
use crate::types::{
    CalendarEvent, ChannelMessage, DirectMessage, EmailMessage, MessageRecord, PriorityLabel,
    Timestamp,
};

/// Tuesday 2026-03-10 09:00 at UTC-5.
pub fn now() -> Timestamp {
    DateTime::parse_from_rfc3339("2026-03-10T09:00:00-05:00").unwrap()
}

pub fn config() -> EngineConfig {
    EngineConfig {
        user_identity: "alex".to_string(),
        user_aliases: vec!["alex.morgan@company.com".to_string()],
        ..EngineConfig::default()
    }
}

pub fn channel(id: &str, channel: &str, content: &str) -> ChannelMessage {
    ChannelMessage {
        id: id.to_string(),
        channel: channel.to_string(),
        author: "Sam Patel".to_string(),
        content: content.to_string(),
        timestamp: now() - Duration::days(2),
        priority: Some(PriorityLabel::Medium),
        mentions: Vec::new(),
        has_action_items: false,
        due_date: None,
    }
}

pub fn email(id: &str, from_name: &str, subject: &str, body: &str) -> EmailMessage {
    EmailMessage {
        id: id.to_string(),
        from_name: from_name.to_string(),
        from_address: String::new(),
        to: vec!["team@company.com".to_string()],
        subject: subject.to_string(),
        body: body.to_string(),
        timestamp: now() - Duration::days(2),
        priority: Some(PriorityLabel::Medium),
        action_required: false,
        due_date: None,
    }
}

pub fn direct(id: &str, chat_name: &str, content: &str) -> DirectMessage {
    DirectMessage {
        id: id.to_string(),
        chat_name: chat_name.to_string(),
        sender: "Priya Shah".to_string(),
        content: content.to_string(),
        timestamp: now() - Duration::days(2),
        priority: Some(PriorityLabel::Medium),
        mentions: Vec::new(),
        due_date: None,
    }
}

pub fn event(id: &str, title: &str, starts_in: Duration) -> CalendarEvent {
    CalendarEvent {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        organizer: "Jordan Lee".to_string(),
        attendees: Vec::new(),
        start_time: now() + starts_in,
        end_time: now() + starts_in + Duration::hours(1),
        timestamp: now() - Duration::days(5),
        priority: Some(PriorityLabel::Medium),
        has_action_items: false,
        requires_prep: false,
    }
}

pub fn record_channel(id: &str, name: &str, content: &str) -> MessageRecord {
    MessageRecord::Channel(channel(id, name, content))
}
