//! SK Portal registration core
//!
//! Event-registration engine for a Sangguniang Kabataan community engagement
//! portal: locality-based eligibility, capacity bookkeeping, the registration
//! status lifecycle, and the orchestrating service with its concurrency
//! guarantees. The HTTP layer, authentication and UI live outside this crate
//! and consume it through typed results.

pub mod config;
pub mod database;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{Result, SkPortalError};

// Re-export main components for easy access
pub use database::{EventStore, RegistrationStore, UserStore};
pub use models::{
    EmergencyContact, Event, EventStatus, Registration, RegistrationDetails, RegistrationStatus,
    User, UserRole,
};
pub use services::{EligibilityOutcome, RegistrationService, ServiceFactory};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
