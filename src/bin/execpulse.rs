//! ExecPulse digest CLI.
//!
//! Reads a corpus of message records (JSON array) and prints the digest:
//! top priorities, consolidated action items, detected patterns.
//!
//! Usage: `execpulse [corpus.json]`. Without a path the built-in sample inbox
//! is used. Logging goes to stderr and is controlled by `RUST_LOG`.

use std::path::PathBuf;

use chrono::Utc;

use execpulse_lib::config::load_config;
use execpulse_lib::corpus::Corpus;
use execpulse_lib::devtools::sample_corpus;
use execpulse_lib::digest::build_digest;
use execpulse_lib::EngineConfig;

fn main() {
    env_logger::init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            if e.is_missing() {
                log::info!("No config file, using defaults");
            } else {
                log::warn!(
                    "Failed to load config ({}), using defaults. {}",
                    e,
                    e.recovery_suggestion()
                );
            }
            EngineConfig::default()
        }
    };

    let now = match config.now_in_zone(Utc::now()) {
        Ok(now) => now,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let corpus = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => Corpus::load(&path),
        None => sample_corpus(now),
    };
    let corpus = match corpus {
        Ok(corpus) => corpus,
        Err(e) => {
            eprintln!("Failed to load corpus: {}", e);
            std::process::exit(1);
        }
    };

    let digest = build_digest(&corpus, &config, now);
    match serde_json::to_string_pretty(&digest) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize digest: {}", e);
            std::process::exit(1);
        }
    }
}
