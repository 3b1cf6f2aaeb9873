//! User model
//!
//! Users are owned by the identity subsystem; the registration core only
//! reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Portal role of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Youth,
    SkOfficial,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Youth => "youth",
            UserRole::SkOfficial => "sk_official",
            UserRole::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "youth" => Some(UserRole::Youth),
            "sk_official" => Some(UserRole::SkOfficial),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }

    /// Whether this role carries administrative authority over registrations
    pub fn is_official(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::SkOfficial)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
    pub barangay: Option<String>,
    pub municipality: Option<String>,
    pub province: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
