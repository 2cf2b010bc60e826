//! Application state shared across all route handlers.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use staffdesk_chat::{DialogueEngine, SessionStore};
use staffdesk_core::config::{
    StaffdeskConfig, APPLICATIONS_FILE, CHAT_LOG_FILE, CONTENT_FILE, STAFF_REQUESTS_FILE,
};
use staffdesk_storage::{ContentStore, Journal};

use crate::auth::generate_token;
use crate::error::ApiError;

/// Shared application state.
///
/// All fields use `Arc` for cheap cloning across handler tasks.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<StaffdeskConfig>,
    /// Chat intake engine, owning the session store.
    pub engine: Arc<DialogueEngine>,
    /// Site content document.
    pub content: Arc<ContentStore>,
    /// One record per chat turn.
    pub chat_log: Arc<Journal>,
    pub applications: Arc<Journal>,
    pub staff_requests: Arc<Journal>,
    /// Admin tokens issued since startup. Never expire.
    pub admin_tokens: Arc<Mutex<HashSet<String>>>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// Build state with file paths taken from `config.storage.data_dir`.
    pub fn new(config: StaffdeskConfig) -> Self {
        Self::with_session_store(config, SessionStore::new())
    }

    /// Like [`AppState::new`] but with a caller-supplied session store.
    pub fn with_session_store(config: StaffdeskConfig, sessions: SessionStore) -> Self {
        let content = ContentStore::new(config.data_file(CONTENT_FILE));
        let chat_log = Journal::new(config.data_file(CHAT_LOG_FILE));
        let applications = Journal::new(config.data_file(APPLICATIONS_FILE));
        let staff_requests = Journal::new(config.data_file(STAFF_REQUESTS_FILE));

        Self {
            config: Arc::new(config),
            engine: Arc::new(DialogueEngine::new(sessions)),
            content: Arc::new(content),
            chat_log: Arc::new(chat_log),
            applications: Arc::new(applications),
            staff_requests: Arc::new(staff_requests),
            admin_tokens: Arc::new(Mutex::new(HashSet::new())),
            start_time: Instant::now(),
        }
    }

    pub fn public_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.storage.public_dir)
    }

    /// Address quoted to visitors when no email was collected.
    ///
    /// `chat.offlineEmail` from the content document, else the configured
    /// fallback. Unreadable content falls back too.
    pub fn contact_email(&self) -> String {
        match self.content.offline_email() {
            Ok(Some(email)) => email,
            Ok(None) => self.config.chat.offline_email.clone(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read offline email from content");
                self.config.chat.offline_email.clone()
            }
        }
    }

    /// Mint and remember a new admin token.
    pub fn issue_admin_token(&self) -> Result<String, ApiError> {
        let token = generate_token();
        self.admin_tokens
            .lock()
            .map_err(|e| ApiError::Internal(format!("admin token lock poisoned: {}", e)))?
            .insert(token.clone());
        Ok(token)
    }

    pub fn is_admin_token(&self, token: &str) -> bool {
        self.admin_tokens
            .lock()
            .map(|tokens| tokens.contains(token))
            .unwrap_or(false)
    }
}
