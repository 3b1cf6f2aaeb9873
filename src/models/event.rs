//! Event model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Administrative status of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
    Postponed,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Ongoing => "ongoing",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
            EventStatus::Postponed => "postponed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "upcoming" => Some(EventStatus::Upcoming),
            "ongoing" => Some(EventStatus::Ongoing),
            "completed" => Some(EventStatus::Completed),
            "cancelled" => Some(EventStatus::Cancelled),
            "postponed" => Some(EventStatus::Postponed),
            _ => None,
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub barangay: String,
    pub municipality: Option<String>,
    pub province: Option<String>,
    /// None means unlimited capacity
    pub max_participants: Option<i32>,
    /// Cached count of registrations in the counted set, maintained by the
    /// registration service through atomic increments only
    pub current_participants: i32,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub is_registration_open: bool,
    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
