//! Database module
//!
//! This module handles database connections, the store traits the services
//! depend on, and their Postgres implementations

pub mod connection;
pub mod repositories;
pub mod store;

// Re-export commonly used database components
pub use connection::{create_pool, health_check, run_migrations, DatabasePool, PoolConfig};
pub use repositories::{EventRepository, RegistrationRepository, UserRepository};
pub use store::{EventStore, RegistrationStore, UserStore};
