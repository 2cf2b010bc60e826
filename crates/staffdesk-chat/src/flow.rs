//! The qualification flow and the accumulator for its answers.

use crate::types::{Lead, LeadIntent};

/// One question in the qualification flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Role,
    Location,
    Urgency,
}

/// Fields asked once a lead-capturing intent is detected, in order.
pub const QUALIFICATION_FLOW: [Field; 5] = [
    Field::Name,
    Field::Email,
    Field::Role,
    Field::Location,
    Field::Urgency,
];

impl Field {
    /// Key used for this field in lead records.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Role => "role",
            Field::Location => "location",
            Field::Urgency => "urgency",
        }
    }

    /// Question shown to the visitor.
    pub fn prompt(&self) -> &'static str {
        match self {
            Field::Name => "May I have your full name?",
            Field::Email => "Please share your email so our team can follow up.",
            Field::Role => "What role are you hiring/applying for?",
            Field::Location => "Which state or city is this for?",
            Field::Urgency => "How urgent is this need? (e.g. immediate, this week, this month)",
        }
    }

    /// Field at `step` in the flow, or `None` once the flow is exhausted.
    pub fn at(step: usize) -> Option<Field> {
        QUALIFICATION_FLOW.get(step).copied()
    }
}

/// Answers collected so far for one conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadDraft {
    initial_message: String,
    name: Option<String>,
    email: Option<String>,
    role: Option<String>,
    location: Option<String>,
    urgency: Option<String>,
}

impl LeadDraft {
    pub fn new(initial_message: impl Into<String>) -> Self {
        Self {
            initial_message: initial_message.into(),
            ..Self::default()
        }
    }

    pub fn initial_message(&self) -> &str {
        &self.initial_message
    }

    /// Store the answer for `field`, replacing any earlier one.
    pub fn record(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Role => self.role.as_deref(),
            Field::Location => self.location.as_deref(),
            Field::Urgency => self.urgency.as_deref(),
        }
    }

    /// Answered fields in flow order.
    pub fn collected(&self) -> Vec<(Field, &str)> {
        QUALIFICATION_FLOW
            .iter()
            .filter_map(|f| self.get(*f).map(|v| (*f, v)))
            .collect()
    }

    /// Build the lead. Returns `None` while any field is unanswered.
    pub fn into_lead(self, intent: LeadIntent) -> Option<Lead> {
        Some(Lead {
            intent,
            initial_message: self.initial_message,
            name: self.name?,
            email: self.email?,
            role: self.role?,
            location: self.location?,
            urgency: self.urgency?,
        })
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Role => &mut self.role,
            Field::Location => &mut self.location,
            Field::Urgency => &mut self.urgency,
        }
    }
}
