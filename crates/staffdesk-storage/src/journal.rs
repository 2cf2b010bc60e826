//! Append-only JSON journals.
//!
//! A journal is a single file holding a pretty-printed JSON array. Each
//! append reads the array, pushes the record and writes the file back.
//! The per-journal mutex keeps two appends from interleaving that cycle.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::StorageError;

/// Current time as an ISO-8601 UTC string with millisecond precision.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// One chat turn as written to the chat journal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatLogEntry<L: Serialize> {
    pub at: String,
    pub session_id: String,
    pub message: String,
    pub reply: String,
    /// `null` on every turn except the one completing qualification.
    pub lead: Option<L>,
}

impl<L: Serialize> ChatLogEntry<L> {
    pub fn new(
        session_id: impl Into<String>,
        message: impl Into<String>,
        reply: impl Into<String>,
        lead: Option<L>,
    ) -> Self {
        Self {
            at: timestamp(),
            session_id: session_id.into(),
            message: message.into(),
            reply: reply.into(),
            lead,
        }
    }
}

/// Stamp a form submission with `at`, keeping every submitted field.
///
/// A submitted `at` field wins over the generated one.
pub fn submission_record(body: Map<String, Value>) -> Value {
    let mut record = Map::with_capacity(body.len() + 1);
    record.insert("at".to_string(), Value::String(timestamp()));
    record.extend(body);
    Value::Object(record)
}

/// A JSON-array file that only grows.
#[derive(Debug)]
pub struct Journal {
    path: PathBuf,
    lock: Mutex<()>,
}

impl Journal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record. Returns the journal length after the append.
    pub fn append<T: Serialize>(&self, record: &T) -> Result<usize, StorageError> {
        let value = serde_json::to_value(record).map_err(|e| StorageError::json(&self.path, e))?;

        let _guard = self
            .lock
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;

        let mut entries = self.read_unlocked()?;
        entries.push(value);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
        let text =
            serde_json::to_string_pretty(&entries).map_err(|e| StorageError::json(&self.path, e))?;
        fs::write(&self.path, text).map_err(|e| StorageError::io(&self.path, e))?;

        debug!(path = %self.path.display(), len = entries.len(), "Journal appended");
        Ok(entries.len())
    }

    /// All records, oldest first. A missing file is an empty journal.
    pub fn entries(&self) -> Result<Vec<Value>, StorageError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        self.read_unlocked()
    }

    fn read_unlocked(&self) -> Result<Vec<Value>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };

        match serde_json::from_str(&text).map_err(|e| StorageError::json(&self.path, e))? {
            Value::Array(entries) => Ok(entries),
            _ => Err(StorageError::Corrupt(self.path.clone())),
        }
    }
}
