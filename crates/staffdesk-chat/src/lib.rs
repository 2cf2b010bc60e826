//! Conversational intake for the Staffdesk chat widget.
//!
//! Classifies what a visitor wants, walks candidates and employers through
//! a fixed set of qualification questions, and hands back a structured
//! lead once every answer is in.

pub mod classifier;
pub mod engine;
pub mod error;
pub mod flow;
pub mod session;
pub mod types;

pub use classifier::classify;
pub use engine::{validate_message, DialogueEngine};
pub use error::ChatError;
pub use flow::{Field, LeadDraft, QUALIFICATION_FLOW};
pub use session::{Qualification, SessionState, SessionStore};
pub use types::{Intent, Lead, LeadIntent, TurnOutcome};
