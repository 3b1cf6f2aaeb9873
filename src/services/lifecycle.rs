//! Registration status lifecycle
//!
//! State machine for a single registration:
//! pending -> confirmed -> attended | no_show, with cancellation allowed from
//! pending and confirmed. cancelled, attended and no_show are terminal; a
//! cancelled registration does not resurrect, renewed intent is a new record.

use crate::models::{Registration, RegistrationStatus, User};
use crate::services::capacity::counts_toward_capacity;
use crate::utils::errors::{Result, SkPortalError};

/// Whether the state machine permits the transition at all, regardless of
/// who is asking
pub fn is_valid_transition(from: RegistrationStatus, to: RegistrationStatus) -> bool {
    use RegistrationStatus::*;

    match (from, to) {
        (Pending, Confirmed) | (Pending, Cancelled) => true,
        (Confirmed, Attended) | (Confirmed, NoShow) | (Confirmed, Cancelled) => true,
        _ => false,
    }
}

/// Whether the acting user has the authority to drive the transition.
///
/// Officials may drive any transition the machine permits; a regular user may
/// only cancel their own pending or confirmed registration.
pub fn can_transition(
    acting_user: &User,
    registration: &Registration,
    to: RegistrationStatus,
) -> bool {
    if acting_user.role.is_official() {
        return true;
    }

    acting_user.id == registration.user_id
        && to == RegistrationStatus::Cancelled
        && matches!(
            registration.status,
            RegistrationStatus::Pending | RegistrationStatus::Confirmed
        )
}

/// Validate a requested transition. Authority is checked before the state
/// machine so that a forbidden actor sees a permission error, not a state
/// error.
pub fn validate_transition(
    acting_user: &User,
    registration: &Registration,
    to: RegistrationStatus,
) -> Result<()> {
    if !can_transition(acting_user, registration, to) {
        return Err(SkPortalError::PermissionDenied(format!(
            "user {} may not move registration {} to {}",
            acting_user.id, registration.id, to
        )));
    }

    if !is_valid_transition(registration.status, to) {
        return Err(SkPortalError::InvalidStateTransition {
            from: registration.status.to_string(),
            to: to.to_string(),
        });
    }

    Ok(())
}

/// Counted-set delta for the event's cached participant count when a
/// registration moves between statuses
pub fn count_delta(from: RegistrationStatus, to: RegistrationStatus) -> i32 {
    match (counts_toward_capacity(from), counts_toward_capacity(to)) {
        (false, true) => 1,
        (true, false) => -1,
        _ => 0,
    }
}
