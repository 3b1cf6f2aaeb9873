//! Store traits for the registration core's persistence collaborators
//!
//! The core is read-only over users and events except for the participant
//! counter, which it moves exclusively through `atomic_increment_participants`.
//! Implementations must make that call a single atomic read-modify-write.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{Event, NewRegistration, Registration, RegistrationStatus, User};
use crate::utils::errors::Result;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_by_id(&self, user_id: i64) -> Result<Option<User>>;
}

#[async_trait]
pub trait EventStore: Send + Sync {
    async fn get_by_id(&self, event_id: i64) -> Result<Option<Event>>;

    /// Atomically adjust the cached participant count.
    ///
    /// Returns `SkPortalError::Conflict` when the conditional update does not
    /// apply (the counter would go negative); callers retry a bounded number
    /// of times. Implementations must never split this into a read followed
    /// by a write.
    async fn atomic_increment_participants(&self, event_id: i64, delta: i32) -> Result<()>;
}

#[async_trait]
pub trait RegistrationStore: Send + Sync {
    async fn find_by_id(&self, registration_id: i64) -> Result<Option<Registration>>;

    /// The at-most-one active (non-cancelled) registration for a (user, event)
    /// pair, if any
    async fn find_active_by_user_and_event(
        &self,
        user_id: i64,
        event_id: i64,
    ) -> Result<Option<Registration>>;

    async fn create(&self, registration: NewRegistration) -> Result<Registration>;

    /// Write a new status. When the status is `attended` the store records
    /// `attendance_marked` and the supplied attendance time alongside it.
    async fn update_status(
        &self,
        registration_id: i64,
        new_status: RegistrationStatus,
        attendance_time: Option<DateTime<Utc>>,
    ) -> Result<Registration>;

    async fn list_by_event(&self, event_id: i64) -> Result<Vec<Registration>>;

    /// True count of registrations in the counted set for an event, used to
    /// verify the cached counter
    async fn count_counted_by_event(&self, event_id: i64) -> Result<i64>;
}
