//! Engine configuration stored in ~/.execpulse/config.json
//!
//! Passed explicitly into every pass. Nothing here is cached globally.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CLIENT_MARKERS, DEFAULT_VIP_MARKERS};
use crate::error::ConfigError;
use crate::store::KeyValueStore;
use crate::types::Timestamp;

/// Key under which the config is stored in a [`KeyValueStore`].
pub const CONFIG_KEY: &str = "config";

/// Shown as the assignee when no identity is configured.
const FALLBACK_ASSIGNEE: &str = "me";

// Empty matches nothing until the user configures an identity
fn default_user_identity() -> String {
    String::new()
}

fn default_vip_markers() -> Vec<String> {
    DEFAULT_VIP_MARKERS.iter().map(|s| s.to_string()).collect()
}

fn default_client_markers() -> Vec<String> {
    DEFAULT_CLIENT_MARKERS.iter().map(|s| s.to_string()).collect()
}

fn default_top_n() -> usize {
    5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// The single end-user. Used for mention checks and as every action's assignee.
    /// Empty by default, which never matches a mention or recipient.
    #[serde(default = "default_user_identity")]
    pub user_identity: String,
    /// Other handles the user goes by (first name, email local part, chat nick).
    #[serde(default)]
    pub user_aliases: Vec<String>,
    /// Substrings of a sender string that mark a VIP.
    #[serde(default = "default_vip_markers")]
    pub vip_markers: Vec<String>,
    /// Substrings of an email sender that mark a client.
    #[serde(default = "default_client_markers")]
    pub client_markers: Vec<String>,
    /// IANA zone for "now". Host local time when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Appended to the built-in urgent keyword list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_urgent_keywords: Vec<String>,
    /// Appended to the built-in business keyword list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_business_keywords: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            user_identity: default_user_identity(),
            user_aliases: Vec::new(),
            vip_markers: default_vip_markers(),
            client_markers: default_client_markers(),
            timezone: None,
            top_n: default_top_n(),
            extra_urgent_keywords: Vec::new(),
            extra_business_keywords: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Identity plus aliases, lower-cased, without a leading `@`, blanks dropped.
    pub fn user_tokens(&self) -> Vec<String> {
        std::iter::once(&self.user_identity)
            .chain(self.user_aliases.iter())
            .map(|s| s.trim().trim_start_matches('@').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Label put on extracted actions. The identity, or "me" when none is set.
    pub fn assignee_label(&self) -> String {
        match self.user_identity.trim() {
            "" => FALLBACK_ASSIGNEE.to_string(),
            identity => identity.to_string(),
        }
    }

    /// True if `sender` contains any VIP marker (case-insensitive).
    pub fn is_vip(&self, sender: &str) -> bool {
        contains_any_marker(sender, &self.vip_markers)
    }

    /// True if `sender` contains any client marker (case-insensitive).
    pub fn is_client(&self, sender: &str) -> bool {
        contains_any_marker(sender, &self.client_markers)
    }

    /// True if a mention list names the user, or the text carries `@user`
    /// as a whole handle.
    pub fn is_mentioned(&self, mentions: &[String], text: &str) -> bool {
        let tokens = self.user_tokens();
        let listed = mentions.iter().any(|m| {
            let m = m.trim().trim_start_matches('@').to_lowercase();
            tokens.iter().any(|t| *t == m)
        });
        if listed {
            return true;
        }
        let lower = text.to_lowercase();
        tokens.iter().any(|t| has_inline_handle(&lower, t))
    }

    /// True if a recipient's address, or its local part, equals one of the
    /// user's tokens. Accepts bare addresses and "Name <address>".
    pub fn is_recipient(&self, recipients: &[String]) -> bool {
        let tokens = self.user_tokens();
        recipients.iter().any(|r| {
            let address = recipient_address(r).to_lowercase();
            let local = address.split('@').next().unwrap_or_default();
            tokens.iter().any(|t| *t == address || *t == local)
        })
    }

    /// Convert an instant into the configured zone.
    pub fn now_in_zone(&self, instant: DateTime<Utc>) -> Result<Timestamp, ConfigError> {
        match self.timezone.as_deref() {
            Some(name) => {
                let tz: Tz = name
                    .parse()
                    .map_err(|_| ConfigError::InvalidTimezone(name.to_string()))?;
                Ok(instant.with_timezone(&tz).fixed_offset())
            }
            None => Ok(instant.with_timezone(&Local).fixed_offset()),
        }
    }

    pub fn save_to_store(&self, store: &dyn KeyValueStore) -> Result<(), ConfigError> {
        let raw = serde_json::to_string(self)?;
        store.set(CONFIG_KEY, &raw)?;
        Ok(())
    }

    /// Load from a store. Absent key yields the default config.
    pub fn load_from_store(store: &dyn KeyValueStore) -> Result<Self, ConfigError> {
        match store.get(CONFIG_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Self::default()),
        }
    }
}

fn is_handle_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `@token` not glued to a longer word: "@alex," and "@alex." match,
/// "@alexis", "@alex.com", "@alex-team" and "bob@alex" do not.
fn has_inline_handle(lower: &str, token: &str) -> bool {
    let handle = format!("@{}", token);
    lower.match_indices(&handle).any(|(start, _)| {
        let glued_before = lower[..start].chars().next_back().is_some_and(is_handle_char);
        let mut after = lower[start + handle.len()..].chars();
        let glued_after = match after.next() {
            None => false,
            Some('.') | Some('-') => after.next().is_some_and(is_handle_char),
            Some(c) => is_handle_char(c),
        };
        !glued_before && !glued_after
    })
}

// "Name <addr>" yields addr, anything else is taken as-is
fn recipient_address(recipient: &str) -> &str {
    let trimmed = recipient.trim();
    match (trimmed.find('<'), trimmed.rfind('>')) {
        (Some(open), Some(close)) if open < close => trimmed[open + 1..close].trim(),
        _ => trimmed,
    }
}

fn contains_any_marker(haystack: &str, markers: &[String]) -> bool {
    let lower = haystack.to_lowercase();
    markers
        .iter()
        .map(|m| m.trim().to_lowercase())
        .filter(|m| !m.is_empty())
        .any(|m| lower.contains(&m))
}

pub fn config_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
    Ok(home.join(".execpulse").join("config.json"))
}

/// Load config from ~/.execpulse/config.json
pub fn load_config() -> Result<EngineConfig, ConfigError> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<EngineConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let config: EngineConfig = serde_json::from_str(&content)?;

    // Surface a bad zone at load time rather than on the first pass
    if let Some(name) = config.timezone.as_deref() {
        if name.parse::<Tz>().is_err() {
            return Err(ConfigError::InvalidTimezone(name.to_string()));
        }
    }

    Ok(config)
}
