//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{Result, SkPortalError};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_database_config(&settings.database)?;
    validate_logging_config(&settings.logging)?;
    validate_registration_config(&settings.registration)?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(SkPortalError::Config(
            "Database URL is required".to_string(),
        ));
    }

    if config.max_connections == 0 {
        return Err(SkPortalError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(SkPortalError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(SkPortalError::Config(format!(
            "Invalid log level: {}",
            config.level
        )));
    }

    Ok(())
}

/// Validate registration configuration
fn validate_registration_config(config: &super::RegistrationConfig) -> Result<()> {
    if config.max_conflict_retries == 0 {
        return Err(SkPortalError::Config(
            "Conflict retries must be at least 1".to_string(),
        ));
    }

    if config.max_conflict_retries > 10 {
        return Err(SkPortalError::Config(
            "Conflict retries cannot exceed 10".to_string(),
        ));
    }

    Ok(())
}
