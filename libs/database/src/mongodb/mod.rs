//! MongoDB connector and driver helpers
//!
//! Provides connection management plus the error classification the
//! document-store repositories rely on.

mod config;
mod connector;
mod errors;
mod health;

pub use config::MongoConfig;
pub use connector::{
    connect, connect_from_config, connect_from_config_with_retry, connect_with_retry,
};
pub use errors::{DUPLICATE_KEY_CODE, is_duplicate_key};
pub use health::{HealthStatus, check_health, check_health_detailed};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
