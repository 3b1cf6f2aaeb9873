//! Shared test context wiring the registration service to in-memory stores

use std::sync::Arc;

use sk_portal::config::settings::RegistrationConfig;
use sk_portal::models::{Event, User};
use sk_portal::services::RegistrationService;

use super::flaky_store::{FlakyEventStore, FlakyRegistrationStore};
use super::memory_store::{MemoryEventStore, MemoryRegistrationStore, MemoryUserStore};

pub struct TestContext {
    pub service: RegistrationService,
    pub users: Arc<MemoryUserStore>,
    pub events: Arc<MemoryEventStore>,
    pub registrations: Arc<MemoryRegistrationStore>,
}

impl TestContext {
    pub fn new() -> Self {
        let users = Arc::new(MemoryUserStore::default());
        let events = Arc::new(MemoryEventStore::default());
        let registrations = Arc::new(MemoryRegistrationStore::default());

        let service = RegistrationService::new(
            users.clone(),
            events.clone(),
            registrations.clone(),
            RegistrationConfig {
                max_conflict_retries: 3,
            },
        );

        Self {
            service,
            users,
            events,
            registrations,
        }
    }

    pub fn seed_user(&self, user: User) {
        self.users.insert(user);
    }

    pub fn seed_event(&self, event: Event) {
        self.events.insert(event);
    }
}

/// Test context whose stores can be made to fail on demand
pub struct FlakyTestContext {
    pub service: RegistrationService,
    pub users: Arc<MemoryUserStore>,
    pub events: Arc<FlakyEventStore>,
    pub registrations: Arc<FlakyRegistrationStore>,
}

impl FlakyTestContext {
    pub fn new() -> Self {
        let users = Arc::new(MemoryUserStore::default());
        let events = Arc::new(FlakyEventStore::new(Arc::new(MemoryEventStore::default())));
        let registrations = Arc::new(FlakyRegistrationStore::new(Arc::new(
            MemoryRegistrationStore::default(),
        )));

        let service = RegistrationService::new(
            users.clone(),
            events.clone(),
            registrations.clone(),
            RegistrationConfig {
                max_conflict_retries: 3,
            },
        );

        Self {
            service,
            users,
            events,
            registrations,
        }
    }

    pub fn seed_user(&self, user: User) {
        self.users.insert(user);
    }

    pub fn seed_event(&self, event: Event) {
        self.events.inner.insert(event);
    }

    pub fn current_participants(&self, event_id: i64) -> i32 {
        self.events.inner.current_participants(event_id)
    }
}
