//! Editable site content document.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::error::StorageError;

/// The `content.json` document served to the public site.
#[derive(Debug)]
pub struct ContentStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl ContentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the document. A missing file reads as an empty object.
    pub fn read(&self) -> Result<Value, StorageError> {
        let _guard = self
            .lock
            .read()
            .map_err(|e| StorageError::Lock(e.to_string()))?;

        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "Content file missing, serving empty content");
                return Ok(Value::Object(Map::new()));
            }
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };
        serde_json::from_str(&text).map_err(|e| StorageError::json(&self.path, e))
    }

    /// Replace the document. Only JSON objects are accepted.
    pub fn write(&self, content: &Value) -> Result<(), StorageError> {
        if !content.is_object() {
            return Err(StorageError::NotAnObject);
        }

        let text =
            serde_json::to_string_pretty(content).map_err(|e| StorageError::json(&self.path, e))?;

        let _guard = self
            .lock
            .write()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
        fs::write(&self.path, text).map_err(|e| StorageError::io(&self.path, e))?;

        info!(path = %self.path.display(), "Site content updated");
        Ok(())
    }

    /// `chat.offlineEmail`, when the document sets a non-blank one.
    pub fn offline_email(&self) -> Result<Option<String>, StorageError> {
        let content = self.read()?;
        Ok(content
            .pointer("/chat/offlineEmail")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string))
    }
}
