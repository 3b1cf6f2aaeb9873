//! Fault-injecting store wrappers
//!
//! Wrap the in-memory stores and fail a configured number of calls so tests
//! can exercise the retry, rollback and compensation paths.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use sk_portal::database::store::{EventStore, RegistrationStore};
use sk_portal::models::{Event, NewRegistration, Registration, RegistrationStatus};
use sk_portal::{Result, SkPortalError};

use super::memory_store::{MemoryEventStore, MemoryRegistrationStore};

/// Consume one pending fault, if any are armed
fn take_fault(remaining: &AtomicU32) -> bool {
    remaining
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

fn injected_outage() -> SkPortalError {
    SkPortalError::ServiceUnavailable("injected storage outage".to_string())
}

#[derive(Default)]
pub struct FlakyEventStore {
    pub inner: Arc<MemoryEventStore>,
    increment_conflicts_remaining: AtomicU32,
}

impl FlakyEventStore {
    pub fn new(inner: Arc<MemoryEventStore>) -> Self {
        Self {
            inner,
            increment_conflicts_remaining: AtomicU32::new(0),
        }
    }

    /// Make the next `count` counter updates fail with `Conflict`
    pub fn inject_increment_conflicts(&self, count: u32) {
        self.increment_conflicts_remaining
            .store(count, Ordering::SeqCst);
    }
}

#[async_trait]
impl EventStore for FlakyEventStore {
    async fn get_by_id(&self, event_id: i64) -> Result<Option<Event>> {
        self.inner.get_by_id(event_id).await
    }

    async fn atomic_increment_participants(&self, event_id: i64, delta: i32) -> Result<()> {
        if take_fault(&self.increment_conflicts_remaining) {
            return Err(SkPortalError::Conflict { event_id });
        }
        self.inner
            .atomic_increment_participants(event_id, delta)
            .await
    }
}

#[derive(Default)]
pub struct FlakyRegistrationStore {
    pub inner: Arc<MemoryRegistrationStore>,
    create_failures_remaining: AtomicU32,
    update_failures_remaining: AtomicU32,
}

impl FlakyRegistrationStore {
    pub fn new(inner: Arc<MemoryRegistrationStore>) -> Self {
        Self {
            inner,
            create_failures_remaining: AtomicU32::new(0),
            update_failures_remaining: AtomicU32::new(0),
        }
    }

    /// Make the next `count` create calls fail
    pub fn inject_create_failures(&self, count: u32) {
        self.create_failures_remaining.store(count, Ordering::SeqCst);
    }

    /// Make the next `count` status writes fail
    pub fn inject_update_failures(&self, count: u32) {
        self.update_failures_remaining.store(count, Ordering::SeqCst);
    }
}

#[async_trait]
impl RegistrationStore for FlakyRegistrationStore {
    async fn find_by_id(&self, registration_id: i64) -> Result<Option<Registration>> {
        self.inner.find_by_id(registration_id).await
    }

    async fn find_active_by_user_and_event(
        &self,
        user_id: i64,
        event_id: i64,
    ) -> Result<Option<Registration>> {
        self.inner
            .find_active_by_user_and_event(user_id, event_id)
            .await
    }

    async fn create(&self, registration: NewRegistration) -> Result<Registration> {
        if take_fault(&self.create_failures_remaining) {
            return Err(injected_outage());
        }
        self.inner.create(registration).await
    }

    async fn update_status(
        &self,
        registration_id: i64,
        new_status: RegistrationStatus,
        attendance_time: Option<DateTime<Utc>>,
    ) -> Result<Registration> {
        if take_fault(&self.update_failures_remaining) {
            return Err(injected_outage());
        }
        self.inner
            .update_status(registration_id, new_status, attendance_time)
            .await
    }

    async fn list_by_event(&self, event_id: i64) -> Result<Vec<Registration>> {
        self.inner.list_by_event(event_id).await
    }

    async fn count_counted_by_event(&self, event_id: i64) -> Result<i64> {
        self.inner.count_counted_by_event(event_id).await
    }
}
