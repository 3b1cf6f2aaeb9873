//! Registration model
//!
//! A registration ties a user to an event and moves through the status
//! lifecycle enforced by `services::lifecycle`. Registrations are never
//! physically deleted by the core; cancellation is a status change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Attended,
    NoShow,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Confirmed => "confirmed",
            RegistrationStatus::Cancelled => "cancelled",
            RegistrationStatus::Attended => "attended",
            RegistrationStatus::NoShow => "no_show",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(RegistrationStatus::Pending),
            "confirmed" => Some(RegistrationStatus::Confirmed),
            "cancelled" => Some(RegistrationStatus::Cancelled),
            "attended" => Some(RegistrationStatus::Attended),
            "no_show" => Some(RegistrationStatus::NoShow),
            _ => None,
        }
    }

    /// Active registrations block re-registration for the same (user, event)
    pub fn is_active(&self) -> bool {
        !matches!(self, RegistrationStatus::Cancelled)
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub relationship: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub status: RegistrationStatus,
    pub registration_date: DateTime<Utc>,
    pub emergency_contact: EmergencyContact,
    pub special_requirements: Option<String>,
    pub notes: Option<String>,
    pub attendance_marked: bool,
    pub attendance_time: Option<DateTime<Utc>>,
}

/// Caller-supplied details for a new registration.
///
/// This is the full allow-listed field set for creation; everything else on
/// the record (status, timestamps, attendance) is owned by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationDetails {
    pub emergency_contact: EmergencyContact,
    pub special_requirements: Option<String>,
    pub notes: Option<String>,
}

/// A registration record as handed to the store for insertion
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub event_id: i64,
    pub user_id: i64,
    pub status: RegistrationStatus,
    pub registration_date: DateTime<Utc>,
    pub emergency_contact: EmergencyContact,
    pub special_requirements: Option<String>,
    pub notes: Option<String>,
}
