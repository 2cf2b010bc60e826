//! Dialogue engine: drives one conversational turn.
//!
//! A conversation with no stored session is classified. Credentialing and
//! general inquiries are answered and closed immediately. Candidates and
//! employers get a session and are asked each qualification field in
//! turn. The answer to the last field closes the session and yields a
//! [`Lead`](crate::types::Lead).

use crate::classifier::classify;
use crate::error::ChatError;
use crate::flow::Field;
use crate::session::{Qualification, SessionState, SessionStore};
use crate::types::{Intent, LeadIntent, TurnOutcome};

const CREDENTIALING_REPLY: &str = "Our workforce technology team supports credential tracking, \
onboarding, and compliance workflows. Would you like a specialist to contact you?";

/// Reject messages the engine should never see.
///
/// Returns the message unchanged when it is acceptable.
pub fn validate_message(message: &str, max_chars: usize) -> Result<&str, ChatError> {
    if message.trim().is_empty() {
        return Err(ChatError::EmptyMessage);
    }
    if message.chars().count() > max_chars {
        return Err(ChatError::MessageTooLong(max_chars));
    }
    Ok(message)
}

/// Drives conversations against an owned [`SessionStore`].
pub struct DialogueEngine {
    store: SessionStore,
}

impl DialogueEngine {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Handle one inbound message for `session_id`.
    ///
    /// `contact` is the fallback address quoted when no email was
    /// collected. The store lock is held for the whole turn.
    pub fn turn(
        &self,
        session_id: &str,
        utterance: &str,
        contact: &str,
    ) -> Result<TurnOutcome, ChatError> {
        let outcome = self.store.transition(session_id, |state| match state {
            SessionState::NoSession => open(utterance, contact),
            SessionState::Qualifying(q) => advance(q, utterance, contact),
        })?;

        tracing::debug!(session_id, done = outcome.done, "Chat turn handled");
        if let Some(ref lead) = outcome.lead {
            tracing::info!(session_id, intent = %lead.intent, "Lead qualified");
        }
        Ok(outcome)
    }
}

/// First message of a conversation.
fn open(utterance: &str, contact: &str) -> (Option<Qualification>, TurnOutcome) {
    let intent = classify(utterance);
    tracing::debug!(%intent, "Conversation classified");

    match intent.lead_intent() {
        Some(lead_intent) => {
            let framing = match lead_intent {
                LeadIntent::Candidate => "Great! I can help with jobs.",
                LeadIntent::Employer => "Absolutely—we support urgent staffing.",
            };
            let reply = format!("{} {}", framing, Field::Name.prompt());
            (
                Some(Qualification::new(lead_intent, utterance)),
                TurnOutcome::ongoing(reply),
            )
        }
        None if intent == Intent::Credentialing => {
            (None, TurnOutcome::finished(CREDENTIALING_REPLY))
        }
        None => (
            None,
            TurnOutcome::finished(format!(
                "Thanks for reaching out. A coordinator can follow up at {}.",
                contact
            )),
        ),
    }
}

/// Record an answer and move to the next field, or finish.
fn advance(
    mut q: Qualification,
    utterance: &str,
    contact: &str,
) -> (Option<Qualification>, TurnOutcome) {
    let Some(field) = q.current_field() else {
        tracing::warn!(step = q.step, "Session step outside the qualification flow");
        return (None, fallback(contact));
    };

    q.draft.record(field, utterance);
    q.step += 1;

    if let Some(next) = q.current_field() {
        return (Some(q), TurnOutcome::ongoing(next.prompt()));
    }

    let intent = q.intent;
    let reach = q
        .draft
        .get(Field::Email)
        .filter(|email| !email.trim().is_empty())
        .unwrap_or(contact)
        .to_string();

    let reply = match intent {
        LeadIntent::Employer => format!(
            "Thank you. Our staffing desk will contact you shortly at {}.",
            reach
        ),
        LeadIntent::Candidate => format!(
            "Perfect. A recruiter will contact you at {} with matching openings.",
            reach
        ),
    };

    match q.draft.into_lead(intent) {
        Some(lead) => (None, TurnOutcome::completed(reply, lead)),
        None => (None, fallback(contact)),
    }
}

fn fallback(contact: &str) -> TurnOutcome {
    TurnOutcome::finished(format!("A coordinator can follow up at {}.", contact))
}
