// Crisis event sink implementations
//
// Events are fire-and-forget: callers log a tag and move on. The file
// sink records hashed message text only; content never lands on disk.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Sink for crisis intervention events. Best-effort at every call site:
/// a failing implementation must never alter the user-facing outcome.
pub trait CrisisEventLog: Send + Sync {
    fn log_crisis_event(&self, tag: &str, query_hash: Option<&str>) -> Result<()>;
}

/// One logged crisis event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub tag: String,
    /// SHA-256 of the triggering message, when the caller supplies one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_hash: Option<String>,
}

/// Hash message text for event records.
pub fn hash_query(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Append-only JSONL event log.
pub struct FileEventLog {
    path: PathBuf,
}

impl FileEventLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CrisisEventLog for FileEventLog {
    fn log_crisis_event(&self, tag: &str, query_hash: Option<&str>) -> Result<()> {
        let record = EventRecord {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            tag: tag.to_string(),
            query_hash: query_hash.map(|h| h.to_string()),
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create event log directory {}", parent.display()))?;
        }

        let line = serde_json::to_string(&record).context("Failed to serialize event record")?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open event log {}", self.path.display()))?;

        writeln!(file, "{}", line)
            .with_context(|| format!("Failed to append to event log {}", self.path.display()))?;

        Ok(())
    }
}

/// No-op sink for tests and for callers that opt out of event logging.
pub struct NullEventLog;

impl CrisisEventLog for NullEventLog {
    fn log_crisis_event(&self, _tag: &str, _query_hash: Option<&str>) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_log_appends_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let log = FileEventLog::new(&path);

        log.log_crisis_event("support", None).unwrap();
        log.log_crisis_event("immediate", Some(&hash_query("message")))
            .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: EventRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.tag, "support");
        assert!(first.query_hash.is_none());

        let second: EventRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.tag, "immediate");
        assert_eq!(second.query_hash, Some(hash_query("message")));
    }

    #[test]
    fn test_file_log_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/events.jsonl");
        let log = FileEventLog::new(&path);

        log.log_crisis_event("support", None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_hash_is_stable_and_hides_content() {
        let hash = hash_query("I feel hopeless");
        assert_eq!(hash, hash_query("I feel hopeless"));
        assert_ne!(hash, hash_query("I feel fine"));
        assert!(!hash.contains("hopeless"));
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_null_log_accepts_everything() {
        let log = NullEventLog;
        assert!(log.log_crisis_event("immediate", None).is_ok());
    }
}
