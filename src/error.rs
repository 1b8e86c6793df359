//! Error types for configuration and persistence.
//!
//! The scoring, extraction, and detection passes are total and never fail.
//! Only the edges that touch the filesystem or parse user input do.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a [`crate::store::KeyValueStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Could not find home directory")]
    HomeDirNotFound,
}

/// Errors raised while loading or resolving [`crate::config::EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found at {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),

    #[error("Could not find home directory")]
    HomeDirNotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ConfigError {
    /// Returns true if falling back to the default config is reasonable.
    pub fn is_missing(&self) -> bool {
        matches!(self, ConfigError::NotFound(_) | ConfigError::HomeDirNotFound)
    }

    /// Get a user-friendly recovery suggestion
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => {
                "Create ~/.execpulse/config.json, e.g. { \"userIdentity\": \"alex\" }"
            }
            ConfigError::Read(_) => "Check file permissions on the config file.",
            ConfigError::Parse(_) => "Check the config file is valid JSON.",
            ConfigError::InvalidTimezone(_) => {
                "Use an IANA timezone name such as \"America/New_York\"."
            }
            ConfigError::HomeDirNotFound => "Set HOME or pass an explicit config path.",
            ConfigError::Store(_) => "Check the state store file and disk space.",
        }
    }
}

/// Errors raised while reading a corpus file.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Failed to read corpus {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse corpus: {0}")]
    Parse(#[from] serde_json::Error),
}
