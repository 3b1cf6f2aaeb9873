//! Error handling for the SK portal core
//!
//! This module defines the main error types used throughout the crate
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for SK portal operations
#[derive(Error, Debug)]
pub enum SkPortalError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: i64 },

    #[error("Registration not found: {registration_id}")]
    RegistrationNotFound { registration_id: i64 },

    #[error("User {user_id} is already registered for event {event_id}")]
    AlreadyRegistered { user_id: i64, event_id: i64 },

    #[error("Not eligible for this event: {reason}")]
    Ineligible { reason: String },

    #[error("Registration is closed: {reason}")]
    RegistrationClosed { reason: String },

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Concurrent update conflict on event {event_id}")]
    Conflict { event_id: i64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Result type alias for SK portal operations
pub type Result<T> = std::result::Result<T, SkPortalError>;

impl SkPortalError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            SkPortalError::Database(_) => false,
            SkPortalError::Migration(_) => false,
            SkPortalError::Config(_) => false,
            SkPortalError::UserNotFound { .. } => false,
            SkPortalError::EventNotFound { .. } => false,
            SkPortalError::RegistrationNotFound { .. } => false,
            SkPortalError::AlreadyRegistered { .. } => false,
            SkPortalError::Ineligible { .. } => false,
            SkPortalError::RegistrationClosed { .. } => false,
            SkPortalError::PermissionDenied(_) => false,
            SkPortalError::InvalidStateTransition { .. } => false,
            SkPortalError::Conflict { .. } => true,
            SkPortalError::InvalidInput(_) => false,
            SkPortalError::Serialization(_) => false,
            SkPortalError::Io(_) => true,
            SkPortalError::ServiceUnavailable(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SkPortalError::Database(_) => ErrorSeverity::Critical,
            SkPortalError::Migration(_) => ErrorSeverity::Critical,
            SkPortalError::Config(_) => ErrorSeverity::Critical,
            SkPortalError::PermissionDenied(_) => ErrorSeverity::Warning,
            SkPortalError::Conflict { .. } => ErrorSeverity::Warning,
            SkPortalError::AlreadyRegistered { .. } => ErrorSeverity::Info,
            SkPortalError::Ineligible { .. } => ErrorSeverity::Info,
            SkPortalError::RegistrationClosed { .. } => ErrorSeverity::Info,
            SkPortalError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// Whether the error is an expected business-rule rejection rather than
    /// an infrastructure fault
    pub fn is_business_rejection(&self) -> bool {
        matches!(
            self,
            SkPortalError::AlreadyRegistered { .. }
                | SkPortalError::Ineligible { .. }
                | SkPortalError::RegistrationClosed { .. }
                | SkPortalError::PermissionDenied(_)
                | SkPortalError::InvalidStateTransition { .. }
        )
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
