//! Per-invocation history.
//!
//! One JSON line per hook run in `{dir}/{YYYY-MM-DD}.jsonl`, when enabled.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::notifier::Outcome;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookRecord {
    pub timestamp: String,
    pub event: String,
    /// `spoke` or `failed`.
    pub action: String,
    pub text: String,
    pub text_chars: usize,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_ensured: Option<bool>,
}

impl HookRecord {
    pub fn new(event: &str, outcome: &Outcome, elapsed: Duration) -> Self {
        Self {
            timestamp: Local::now().format("%Y-%m-%dT%H:%M:%S%.3f").to_string(),
            event: event.to_string(),
            action: if outcome.delivered { "spoke" } else { "failed" }.into(),
            text: outcome.message.clone(),
            text_chars: outcome.message.chars().count(),
            duration_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            service_ensured: outcome.ensured,
        }
    }

    /// `YYYY-MM-DD` prefix of the timestamp.
    fn date(&self) -> &str {
        self.timestamp.get(..10).unwrap_or("unknown-date")
    }
}

fn history_file(dir: &Path, date: &str) -> PathBuf {
    dir.join(format!("{date}.jsonl"))
}

pub fn save_record(dir: &Path, record: &HookRecord) {
    if let Err(e) = fs::create_dir_all(dir) {
        warn!("Failed to create history dir {}: {e}", dir.display());
        return;
    }

    let path = history_file(dir, record.date());
    let mut file = match fs::OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            warn!("Failed to open history file {}: {e}", path.display());
            return;
        }
    };

    match serde_json::to_string(record) {
        Ok(line) => {
            if let Err(e) = writeln!(file, "{line}") {
                warn!("Failed to write history record: {e}");
            }
        }
        Err(e) => warn!("Failed to serialize history record: {e}"),
    }
}
