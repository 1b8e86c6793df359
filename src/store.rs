//! Key-value storage port.
//!
//! The engine keeps no process-wide state. Anything that must outlive a pass
//! (the config, which actions the user ticked off) goes through a
//! [`KeyValueStore`] the host hands in.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::types::{ActionItem, Timestamp};

/// Key under which the completion ledger is stored.
pub const COMPLETED_ACTIONS_KEY: &str = "completed_actions";

/// Minimal get/set persistence interface.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

/// Store that lives only as long as the process. Used by tests and hosts
/// that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JSON file backend
// ---------------------------------------------------------------------------

/// Store backed by a single JSON object file. Every `set` rewrites the file
/// via temp file + rename.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// `~/.execpulse/state.json`, creating the directory if needed.
    pub fn open_default() -> Result<Self, StoreError> {
        let home = dirs::home_dir().ok_or(StoreError::HomeDirNotFound)?;
        let dir = home.join(".execpulse");
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(Self::new(dir.join("state.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let temp_path = self.path.with_extension("json.tmp");
        let payload = serde_json::to_string_pretty(entries)?;
        fs::write(&temp_path, payload)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock();
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock();
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }
}

// ---------------------------------------------------------------------------
// Completion ledger
// ---------------------------------------------------------------------------

/// Which extracted actions the user has marked done, keyed by action id.
///
/// Action ids are derived from the source record and sentence position, so a
/// completion recorded in one pass still matches the item re-extracted in the
/// next one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionLedger {
    completed: BTreeMap<String, Timestamp>,
}

impl CompletionLedger {
    pub fn load(store: &dyn KeyValueStore) -> Result<Self, StoreError> {
        match store.get(COMPLETED_ACTIONS_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StoreError> {
        store.set(COMPLETED_ACTIONS_KEY, &serde_json::to_string(self)?)
    }

    pub fn mark_completed(&mut self, action_id: &str, at: Timestamp) {
        self.completed.insert(action_id.to_string(), at);
    }

    /// Returns true if the action was previously marked done.
    pub fn reopen(&mut self, action_id: &str) -> bool {
        self.completed.remove(action_id).is_some()
    }

    pub fn is_completed(&self, action_id: &str) -> bool {
        self.completed.contains_key(action_id)
    }

    pub fn len(&self) -> usize {
        self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    /// Copy completion state onto freshly extracted items.
    pub fn apply(&self, items: &mut [ActionItem]) {
        for item in items.iter_mut() {
            match self.completed.get(&item.id) {
                Some(at) => {
                    item.completed = true;
                    item.completed_at = Some(*at);
                }
                None => {
                    item.completed = false;
                    item.completed_at = None;
                }
            }
        }
    }
}
