//! Shared chat types: intents, leads, and turn outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse category of a conversation, decided on its first message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// Someone looking for work.
    Candidate,
    /// A facility looking for staff.
    Employer,
    /// Credentialing or compliance inquiry.
    Credentialing,
    /// Anything else.
    General,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Candidate => "candidate",
            Intent::Employer => "employer",
            Intent::Credentialing => "credentialing",
            Intent::General => "general",
        }
    }

    /// The lead-capturing form of this intent, if it needs qualification.
    pub fn lead_intent(self) -> Option<LeadIntent> {
        match self {
            Intent::Candidate => Some(LeadIntent::Candidate),
            Intent::Employer => Some(LeadIntent::Employer),
            Intent::Credentialing | Intent::General => None,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Intents that proceed to qualification and end in a [`Lead`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadIntent {
    Candidate,
    Employer,
}

impl From<LeadIntent> for Intent {
    fn from(intent: LeadIntent) -> Self {
        match intent {
            LeadIntent::Candidate => Intent::Candidate,
            LeadIntent::Employer => Intent::Employer,
        }
    }
}

impl fmt::Display for LeadIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Intent::from(*self).fmt(f)
    }
}

/// A fully qualified lead, ready for human follow-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub intent: LeadIntent,
    pub initial_message: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub location: String,
    pub urgency: String,
}

/// Result of one conversational turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Text shown to the visitor.
    pub reply: String,
    /// Whether the conversation has ended and its session was cleared.
    pub done: bool,
    /// Present only on the turn that completes qualification.
    pub lead: Option<Lead>,
}

impl TurnOutcome {
    pub fn ongoing(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            done: false,
            lead: None,
        }
    }

    pub fn finished(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            done: true,
            lead: None,
        }
    }

    pub fn completed(reply: impl Into<String>, lead: Lead) -> Self {
        Self {
            reply: reply.into(),
            done: true,
            lead: Some(lead),
        }
    }
}
