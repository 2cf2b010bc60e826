//! Session store for in-progress conversations.
//!
//! Only conversations that are collecting qualification answers are
//! stored. A conversation that ends (successful handoff or an intent with
//! no follow-up) leaves no row behind. There is no expiry: an abandoned
//! conversation stays until the process restarts.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::ChatError;
use crate::flow::{Field, LeadDraft};
use crate::types::LeadIntent;

/// A conversation that is partway through the qualification flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Qualification {
    /// Set on the first turn, never changed afterwards.
    pub intent: LeadIntent,
    /// Index of the next field to collect.
    pub step: usize,
    /// Answers collected so far.
    pub draft: LeadDraft,
}

impl Qualification {
    /// Start qualification at the first field.
    pub fn new(intent: LeadIntent, initial_message: impl Into<String>) -> Self {
        Self {
            intent,
            step: 0,
            draft: LeadDraft::new(initial_message),
        }
    }

    /// Field the next answer belongs to, if `step` is still inside the flow.
    pub fn current_field(&self) -> Option<Field> {
        Field::at(self.step)
    }
}

/// What the store holds for one session identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    NoSession,
    Qualifying(Qualification),
}

/// Process-wide map from session identifier to its qualification state.
///
/// Cloning is cheap and every clone shares the same map. One lock guards
/// the whole map.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, Qualification>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Qualification>>, ChatError> {
        self.sessions
            .lock()
            .map_err(|e| ChatError::SessionStore(format!("session lock poisoned: {}", e)))
    }

    /// Number of conversations currently mid-qualification.
    pub fn len(&self) -> Result<usize, ChatError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, ChatError> {
        Ok(self.lock()?.is_empty())
    }

    pub fn contains(&self, session_id: &str) -> Result<bool, ChatError> {
        Ok(self.lock()?.contains_key(session_id))
    }

    /// Snapshot of one session.
    pub fn get(&self, session_id: &str) -> Result<Option<Qualification>, ChatError> {
        Ok(self.lock()?.get(session_id).cloned())
    }

    /// Current state of one session.
    pub fn state(&self, session_id: &str) -> Result<SessionState, ChatError> {
        Ok(match self.get(session_id)? {
            Some(q) => SessionState::Qualifying(q),
            None => SessionState::NoSession,
        })
    }

    /// Insert or replace a session row.
    pub fn insert(
        &self,
        session_id: impl Into<String>,
        qualification: Qualification,
    ) -> Result<(), ChatError> {
        self.lock()?.insert(session_id.into(), qualification);
        Ok(())
    }

    pub fn remove(&self, session_id: &str) -> Result<Option<Qualification>, ChatError> {
        Ok(self.lock()?.remove(session_id))
    }

    /// Run one read-modify-write step on a session under the store lock.
    ///
    /// `step` receives the current state and returns the state to keep
    /// (`None` deletes the row) plus a value handed back to the caller.
    pub fn transition<R>(
        &self,
        session_id: &str,
        step: impl FnOnce(SessionState) -> (Option<Qualification>, R),
    ) -> Result<R, ChatError> {
        let mut sessions = self.lock()?;
        let current = match sessions.remove(session_id) {
            Some(q) => SessionState::Qualifying(q),
            None => SessionState::NoSession,
        };

        let (next, out) = step(current);
        if let Some(q) = next {
            sessions.insert(session_id.to_string(), q);
        }
        Ok(out)
    }
}
