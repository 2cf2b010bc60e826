//! Keyword intent classifier.
//!
//! Rule sets are checked in a fixed priority order: candidate, employer,
//! credentialing. Keywords match anywhere in the message, ignoring case,
//! so "staffing" hits the `staff` rule. Anything unmatched is `General`.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::Intent;

// =============================================================================
// Compiled rule sets (compiled once, reused across calls)
// =============================================================================

struct IntentRules {
    candidate: Regex,
    employer: Regex,
    credentialing: Regex,
}

static INTENT_RULES: LazyLock<IntentRules> = LazyLock::new(|| {
    let mk = |words: &[&str]| -> Regex {
        Regex::new(&format!("(?i)(?:{})", words.join("|"))).expect("Invalid intent regex")
    };

    IntentRules {
        candidate: mk(&["job", "nursing", "position", "apply", "career"]),
        employer: mk(&["staff", "hire", "urgent", "coverage", "facility"]),
        credentialing: mk(&["credential", "compliance", "license", "onboard"]),
    }
});

/// Classify the first message of a conversation.
///
/// Total: every input maps to exactly one intent.
pub fn classify(utterance: &str) -> Intent {
    let rules = &*INTENT_RULES;

    if rules.candidate.is_match(utterance) {
        Intent::Candidate
    } else if rules.employer.is_match(utterance) {
        Intent::Employer
    } else if rules.credentialing.is_match(utterance) {
        Intent::Credentialing
    } else {
        Intent::General
    }
}
