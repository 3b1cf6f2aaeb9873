//! In-memory store implementations
//!
//! These mirror the Postgres repositories closely enough for service-level
//! tests: the counter moves through a single locked compare-and-swap and the
//! create path enforces the same active-registration uniqueness the partial
//! index provides.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use sk_portal::database::store::{EventStore, RegistrationStore, UserStore};
use sk_portal::models::{Event, NewRegistration, Registration, RegistrationStatus, User};
use sk_portal::{Result, SkPortalError};

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<i64, User>>,
}

impl MemoryUserStore {
    pub fn insert(&self, user: User) {
        self.users.lock().unwrap().insert(user.id, user);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get_by_id(&self, user_id: i64) -> Result<Option<User>> {
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }
}

#[derive(Default)]
pub struct MemoryEventStore {
    events: Mutex<HashMap<i64, Event>>,
}

impl MemoryEventStore {
    pub fn insert(&self, event: Event) {
        self.events.lock().unwrap().insert(event.id, event);
    }

    pub fn current_participants(&self, event_id: i64) -> i32 {
        self.events
            .lock()
            .unwrap()
            .get(&event_id)
            .map(|e| e.current_participants)
            .unwrap_or_default()
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn get_by_id(&self, event_id: i64) -> Result<Option<Event>> {
        Ok(self.events.lock().unwrap().get(&event_id).cloned())
    }

    async fn atomic_increment_participants(&self, event_id: i64, delta: i32) -> Result<()> {
        let mut events = self.events.lock().unwrap();
        let event = events
            .get_mut(&event_id)
            .ok_or(SkPortalError::EventNotFound { event_id })?;

        if event.current_participants + delta < 0 {
            return Err(SkPortalError::Conflict { event_id });
        }

        event.current_participants += delta;
        event.updated_at = Utc::now();
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryRegistrationStore {
    registrations: Mutex<HashMap<i64, Registration>>,
    next_id: AtomicI64,
}

#[async_trait]
impl RegistrationStore for MemoryRegistrationStore {
    async fn find_by_id(&self, registration_id: i64) -> Result<Option<Registration>> {
        Ok(self
            .registrations
            .lock()
            .unwrap()
            .get(&registration_id)
            .cloned())
    }

    async fn find_active_by_user_and_event(
        &self,
        user_id: i64,
        event_id: i64,
    ) -> Result<Option<Registration>> {
        Ok(self
            .registrations
            .lock()
            .unwrap()
            .values()
            .find(|r| r.user_id == user_id && r.event_id == event_id && r.status.is_active())
            .cloned())
    }

    async fn create(&self, registration: NewRegistration) -> Result<Registration> {
        let mut registrations = self.registrations.lock().unwrap();

        // Same uniqueness the partial index enforces in Postgres
        let duplicate = registrations
            .values()
            .any(|r| {
                r.user_id == registration.user_id
                    && r.event_id == registration.event_id
                    && r.status.is_active()
            });
        if duplicate {
            return Err(SkPortalError::AlreadyRegistered {
                user_id: registration.user_id,
                event_id: registration.event_id,
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let record = Registration {
            id,
            event_id: registration.event_id,
            user_id: registration.user_id,
            status: registration.status,
            registration_date: registration.registration_date,
            emergency_contact: registration.emergency_contact,
            special_requirements: registration.special_requirements,
            notes: registration.notes,
            attendance_marked: false,
            attendance_time: None,
        };
        registrations.insert(id, record.clone());
        Ok(record)
    }

    async fn update_status(
        &self,
        registration_id: i64,
        new_status: RegistrationStatus,
        attendance_time: Option<DateTime<Utc>>,
    ) -> Result<Registration> {
        let mut registrations = self.registrations.lock().unwrap();
        let registration = registrations
            .get_mut(&registration_id)
            .ok_or(SkPortalError::RegistrationNotFound { registration_id })?;

        registration.status = new_status;
        if let Some(time) = attendance_time {
            registration.attendance_marked = true;
            registration.attendance_time = Some(time);
        }

        Ok(registration.clone())
    }

    async fn list_by_event(&self, event_id: i64) -> Result<Vec<Registration>> {
        let mut result: Vec<Registration> = self
            .registrations
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect();
        result.sort_by_key(|r| r.registration_date);
        Ok(result)
    }

    async fn count_counted_by_event(&self, event_id: i64) -> Result<i64> {
        Ok(self
            .registrations
            .lock()
            .unwrap()
            .values()
            .filter(|r| {
                r.event_id == event_id
                    && matches!(
                        r.status,
                        RegistrationStatus::Pending
                            | RegistrationStatus::Confirmed
                            | RegistrationStatus::Attended
                    )
            })
            .count() as i64)
    }
}
