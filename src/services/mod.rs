//! Services module
//!
//! This module contains the registration business logic

pub mod capacity;
pub mod eligibility;
pub mod lifecycle;
pub mod registration;

// Re-export commonly used services
pub use eligibility::EligibilityOutcome;
pub use registration::RegistrationService;

use std::sync::Arc;

use crate::config::settings::Settings;
use crate::database::store::{EventStore, RegistrationStore, UserStore};

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub registration_service: RegistrationService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(
        settings: Settings,
        users: Arc<dyn UserStore>,
        events: Arc<dyn EventStore>,
        registrations: Arc<dyn RegistrationStore>,
    ) -> Self {
        let registration_service =
            RegistrationService::new(users, events, registrations, settings.registration);

        Self {
            registration_service,
        }
    }
}
