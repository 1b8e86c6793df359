//! ExecPulse: rule-based priority scoring and action extraction over an
//! executive's messages (team channels, email, direct chats, calendar).
//!
//! Every analysis pass is a pure function of the corpus, an [`EngineConfig`]
//! and `now`. State that must outlive a pass goes through a
//! [`store::KeyValueStore`] supplied by the host.

pub mod config;
pub mod constants;
pub mod corpus;
pub mod dedup;
pub mod devtools;
pub mod digest;
pub mod error;
pub mod extract;
pub mod patterns;
pub mod ranking;
pub mod scoring;
pub mod store;
pub mod types;
pub mod util;

#[cfg(test)]
mod test_utils;

pub use config::EngineConfig;
pub use corpus::Corpus;
pub use dedup::consolidate;
pub use digest::{build_digest, build_digest_with_ledger, Digest};
pub use extract::{extract_actions, extract_all, infer_deadline};
pub use patterns::detect_patterns;
pub use ranking::{rank, score_record, top_priorities};
pub use types::{
    ActionItem, MessageRecord, Pattern, PatternType, PriorityItem, PriorityLabel, PriorityScore,
    Timestamp,
};
