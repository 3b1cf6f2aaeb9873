//! Event eligibility evaluation
//!
//! Pure locality-matching rules deciding whether a user may register for an
//! event. Barangay is the authoritative unit; municipality is a secondary
//! check applied only when both sides carry a value. Province is never
//! consulted.

use serde::{Deserialize, Serialize};

use crate::models::{Event, User};

/// Outcome of an eligibility check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityOutcome {
    pub eligible: bool,
    pub reason: Option<String>,
}

impl EligibilityOutcome {
    fn eligible() -> Self {
        Self {
            eligible: true,
            reason: None,
        }
    }

    fn ineligible(reason: impl Into<String>) -> Self {
        Self {
            eligible: false,
            reason: Some(reason.into()),
        }
    }
}

/// Normalize a location string for comparison
fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Evaluate whether a user is eligible to register for an event.
///
/// Deterministic and side-effect free; safe to expose directly for
/// pre-flight UI checks.
pub fn evaluate(user: &User, event: &Event) -> EligibilityOutcome {
    // Admin and SK officials can always register (for testing/monitoring)
    if user.role.is_official() {
        return EligibilityOutcome::eligible();
    }

    let user_barangay = user.barangay.as_deref().map(normalize).unwrap_or_default();
    let event_barangay = normalize(&event.barangay);

    if user_barangay.is_empty() {
        return EligibilityOutcome::ineligible(
            "Your profile is missing barangay information. Please update your profile first.",
        );
    }

    if user_barangay != event_barangay {
        return EligibilityOutcome::ineligible(format!(
            "This event is only for residents of {}. Your registered barangay is {}.",
            event.barangay,
            user.barangay.as_deref().unwrap_or_default(),
        ));
    }

    // Municipality is a soft secondary check, applied only when both sides
    // are populated
    let user_municipality = user
        .municipality
        .as_deref()
        .map(normalize)
        .unwrap_or_default();
    let event_municipality = event
        .municipality
        .as_deref()
        .map(normalize)
        .unwrap_or_default();

    if !user_municipality.is_empty()
        && !event_municipality.is_empty()
        && user_municipality != event_municipality
    {
        return EligibilityOutcome::ineligible(format!(
            "This event is only for residents of {}. Your registered municipality is {}.",
            event.municipality.as_deref().unwrap_or_default(),
            user.municipality.as_deref().unwrap_or_default(),
        ));
    }

    EligibilityOutcome::eligible()
}
