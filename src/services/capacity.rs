//! Capacity bookkeeping for events
//!
//! `current_participants` is a cached count of registrations in the counted
//! set (pending, confirmed, attended). The counter is only ever moved through
//! the store's atomic increment; this module holds the pure slot arithmetic.

use crate::models::{Event, RegistrationStatus};

/// Available slots for an event. `None` means unlimited capacity.
pub fn available_slots(event: &Event) -> Option<i32> {
    event
        .max_participants
        .map(|max| (max - event.current_participants).max(0))
}

/// Whether a registration in the given status counts against capacity
pub fn counts_toward_capacity(status: RegistrationStatus) -> bool {
    matches!(
        status,
        RegistrationStatus::Pending | RegistrationStatus::Confirmed | RegistrationStatus::Attended
    )
}

/// Whether a new registration will be accepted with respect to capacity.
///
/// Capacity is a soft gate: a full event still accepts registrations and the
/// overflow is presented as a waitlist by the caller, so this always holds.
/// `available_slots` carries the information needed for waitlist framing.
pub fn can_accept_registration(_event: &Event) -> bool {
    true
}
