//! Registration service implementation
//!
//! Orchestrates eligibility, capacity and lifecycle rules against the stores.
//! All registration writes for one event are serialized through a per-event
//! lock so that the duplicate check, the record write and the participant
//! counter move together.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::config::settings::RegistrationConfig;
use crate::database::store::{EventStore, RegistrationStore, UserStore};
use crate::models::{
    Event, EventStatus, NewRegistration, Registration, RegistrationDetails, RegistrationStatus,
    User,
};
use crate::services::eligibility::{self, EligibilityOutcome};
use crate::services::{capacity, lifecycle};
use crate::utils::errors::{Result, SkPortalError};

/// Per-event serialization locks.
///
/// Registration attempts for distinct events proceed concurrently; attempts
/// for the same event take turns.
#[derive(Clone, Default)]
struct EventLockMap {
    locks: Arc<Mutex<HashMap<i64, Arc<tokio::sync::Mutex<()>>>>>,
}

impl EventLockMap {
    async fn acquire(&self, event_id: i64) -> tokio::sync::OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            // Outstanding guards hold an Arc clone, so a strong count of 1
            // means nobody is using the lock anymore and it can be evicted
            locks.retain(|id, lock| *id == event_id || Arc::strong_count(lock) > 1);
            locks
                .entry(event_id)
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

/// Registration service for managing event registrations
#[derive(Clone)]
pub struct RegistrationService {
    users: Arc<dyn UserStore>,
    events: Arc<dyn EventStore>,
    registrations: Arc<dyn RegistrationStore>,
    config: RegistrationConfig,
    event_locks: EventLockMap,
}

impl RegistrationService {
    /// Create a new RegistrationService instance
    pub fn new(
        users: Arc<dyn UserStore>,
        events: Arc<dyn EventStore>,
        registrations: Arc<dyn RegistrationStore>,
        config: RegistrationConfig,
    ) -> Self {
        Self {
            users,
            events,
            registrations,
            config,
            event_locks: EventLockMap::default(),
        }
    }

    /// Register a user for an event.
    ///
    /// Creates a `pending` registration after the eligibility and
    /// registration-window checks pass. Capacity never rejects: a full event
    /// keeps accepting and overflow is surfaced to callers as a waitlist.
    pub async fn register(
        &self,
        user_id: i64,
        event_id: i64,
        details: RegistrationDetails,
    ) -> Result<Registration> {
        debug!(user_id = user_id, event_id = event_id, "Registering user for event");

        let user = self
            .users
            .get_by_id(user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or(SkPortalError::UserNotFound { user_id })?;

        // A cancelled event is gone as far as registration is concerned
        let event = self
            .events
            .get_by_id(event_id)
            .await?
            .filter(|e| e.status != EventStatus::Cancelled)
            .ok_or(SkPortalError::EventNotFound { event_id })?;

        let _guard = self.event_locks.acquire(event_id).await;

        if let Some(existing) = self
            .registrations
            .find_active_by_user_and_event(user_id, event_id)
            .await?
        {
            debug!(
                user_id = user_id,
                event_id = event_id,
                registration_id = existing.id,
                "Active registration already exists"
            );
            return Err(SkPortalError::AlreadyRegistered { user_id, event_id });
        }

        let outcome = eligibility::evaluate(&user, &event);
        if !outcome.eligible {
            return Err(SkPortalError::Ineligible {
                reason: outcome.reason.unwrap_or_default(),
            });
        }

        let now = Utc::now();
        if !event.is_registration_open {
            return Err(SkPortalError::RegistrationClosed {
                reason: "Registration is closed for this event".to_string(),
            });
        }
        if let Some(deadline) = event.registration_deadline {
            if now > deadline {
                return Err(SkPortalError::RegistrationClosed {
                    reason: "The registration deadline has passed".to_string(),
                });
            }
        }

        if capacity::available_slots(&event) == Some(0) {
            info!(
                event_id = event_id,
                user_id = user_id,
                "Event is at capacity, accepting registration as waitlist overflow"
            );
        }

        // Counter first, record second; a failed create compensates the
        // increment so neither outlives the other
        self.adjust_participants(event_id, 1).await?;

        let new_registration = NewRegistration {
            event_id,
            user_id,
            status: RegistrationStatus::Pending,
            registration_date: now,
            emergency_contact: details.emergency_contact,
            special_requirements: details.special_requirements,
            notes: details.notes,
        };

        match self.registrations.create(new_registration).await {
            Ok(registration) => {
                info!(
                    registration_id = registration.id,
                    user_id = user_id,
                    event_id = event_id,
                    "User registered for event"
                );
                Ok(registration)
            }
            Err(e) => {
                if let Err(rollback) = self.adjust_participants(event_id, -1).await {
                    error!(
                        event_id = event_id,
                        error = %rollback,
                        "Failed to roll back participant count after create failure"
                    );
                }
                Err(e)
            }
        }
    }

    /// Drive a registration through a lifecycle transition.
    ///
    /// The status write and the counted-set delta are paired under the
    /// event's lock.
    pub async fn update_status(
        &self,
        registration_id: i64,
        new_status: RegistrationStatus,
        acting_user: &User,
    ) -> Result<Registration> {
        debug!(
            registration_id = registration_id,
            new_status = %new_status,
            acting_user_id = acting_user.id,
            "Updating registration status"
        );

        // First load only to learn the owning event; the authoritative read
        // happens under that event's lock
        let registration = self
            .registrations
            .find_by_id(registration_id)
            .await?
            .ok_or(SkPortalError::RegistrationNotFound { registration_id })?;
        let event_id = registration.event_id;

        let _guard = self.event_locks.acquire(event_id).await;

        let registration = self
            .registrations
            .find_by_id(registration_id)
            .await?
            .ok_or(SkPortalError::RegistrationNotFound { registration_id })?;

        lifecycle::validate_transition(acting_user, &registration, new_status)?;

        let delta = lifecycle::count_delta(registration.status, new_status);
        let attendance_time =
            (new_status == RegistrationStatus::Attended).then(Utc::now);

        // Counter first, status second; a failed status write compensates the
        // delta so neither change outlives the other
        if delta != 0 {
            self.adjust_participants(event_id, delta).await?;
        }

        let updated = match self
            .registrations
            .update_status(registration_id, new_status, attendance_time)
            .await
        {
            Ok(updated) => updated,
            Err(e) => {
                if delta != 0 {
                    if let Err(rollback) = self.adjust_participants(event_id, -delta).await {
                        error!(
                            event_id = event_id,
                            registration_id = registration_id,
                            error = %rollback,
                            "Failed to roll back participant count after status write failure"
                        );
                    }
                }
                return Err(e);
            }
        };

        if acting_user.role.is_official() && acting_user.id != registration.user_id {
            warn!(
                admin_id = acting_user.id,
                registration_id = registration_id,
                from = %registration.status,
                to = %new_status,
                "Registration status changed by official"
            );
        } else {
            info!(
                registration_id = registration_id,
                from = %registration.status,
                to = %new_status,
                "Registration status changed"
            );
        }

        Ok(updated)
    }

    /// Pre-flight eligibility check, mirroring the evaluator's pure contract
    pub fn check_eligibility(&self, user: &User, event: &Event) -> EligibilityOutcome {
        eligibility::evaluate(user, event)
    }

    /// Available slots for an event; `None` means unlimited
    pub fn available_slots(&self, event: &Event) -> Option<i32> {
        capacity::available_slots(event)
    }

    /// Compare the cached participant counter against the true counted-set
    /// size for an event
    pub async fn verify_participant_count(&self, event_id: i64) -> Result<bool> {
        let event = self
            .events
            .get_by_id(event_id)
            .await?
            .ok_or(SkPortalError::EventNotFound { event_id })?;
        let counted = self.registrations.count_counted_by_event(event_id).await?;

        Ok(i64::from(event.current_participants) == counted)
    }

    /// Apply a counter delta, retrying bounded on conflict.
    ///
    /// Never falls back to a non-atomic read-modify-write.
    async fn adjust_participants(&self, event_id: i64, delta: i32) -> Result<()> {
        let mut attempts = 0;
        loop {
            match self
                .events
                .atomic_increment_participants(event_id, delta)
                .await
            {
                Ok(()) => return Ok(()),
                Err(SkPortalError::Conflict { .. }) => {
                    attempts += 1;
                    if attempts >= self.config.max_conflict_retries {
                        error!(
                            event_id = event_id,
                            delta = delta,
                            attempts = attempts,
                            "Participant count update kept conflicting"
                        );
                        return Err(SkPortalError::ServiceUnavailable(format!(
                            "could not update participant count for event {event_id}"
                        )));
                    }
                    warn!(
                        event_id = event_id,
                        delta = delta,
                        attempt = attempts,
                        "Participant count update conflicted, retrying"
                    );
                    tokio::time::sleep(std::time::Duration::from_millis(
                        10 * u64::from(attempts),
                    ))
                    .await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
