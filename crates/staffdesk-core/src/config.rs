use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, StaffdeskError};

/// File holding the editable site content.
pub const CONTENT_FILE: &str = "content.json";
/// Journal of every chat turn and completed lead.
pub const CHAT_LOG_FILE: &str = "chat-leads.json";
/// Journal of job applications.
pub const APPLICATIONS_FILE: &str = "applications.json";
/// Journal of staffing requests.
pub const STAFF_REQUESTS_FILE: &str = "staff-requests.json";

/// Top-level configuration for the Staffdesk service.
///
/// Loaded from `staffdesk.toml` by default. Every section falls back to its
/// defaults when absent, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaffdeskConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

impl StaffdeskConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: StaffdeskConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Like [`StaffdeskConfig::load`], but a missing file is `Ok(None)`.
    ///
    /// Parse and read failures are still errors so the caller can report
    /// them once logging is up.
    pub fn load_if_present(path: &Path) -> Result<Option<Self>> {
        match Self::load(path) {
            Ok(config) => Ok(Some(config)),
            Err(StaffdeskError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| StaffdeskError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Path of a named file inside the data directory.
    pub fn data_file(&self, name: &str) -> PathBuf {
        PathBuf::from(&self.storage.data_dir).join(name)
    }
}

/// General service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Maximum submissions per second across the `/api` POST routes.
    pub rate_limit_per_sec: u64,
    /// Maximum accepted request body size.
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            rate_limit_per_sec: 50,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

/// Flat-file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the content document and the journals.
    pub data_dir: String,
    /// Directory holding the static site.
    pub public_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            public_dir: "public".to_string(),
        }
    }
}

/// Chat widget settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Contact address used when the content document has no `chat.offlineEmail`.
    pub offline_email: String,
    /// Longest accepted chat message, in characters.
    pub max_message_length: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            offline_email: "hello@staffdesk.example".to_string(),
            max_message_length: 2000,
        }
    }
}

/// Content editor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Password exchanged for an editor token.
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: "admin1234".to_string(),
        }
    }
}
