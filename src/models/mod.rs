//! Data models for the SK portal registration core

pub mod event;
pub mod registration;
pub mod user;

pub use event::{Event, EventStatus};
pub use registration::{
    EmergencyContact, NewRegistration, Registration, RegistrationDetails, RegistrationStatus,
};
pub use user::{User, UserRole};
