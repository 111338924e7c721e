use core_config::storage::StorageBackend;
use core_config::{FromEnv, env_parse_or};
use std::time::Duration;

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub storage: StorageBackend,
    /// Present only when the backend needs a MongoDB connection
    pub mongodb: Option<MongoConfig>,
    /// Upper bound for connecting and preparing storage (`STARTUP_TIMEOUT_SECS`, default 60)
    pub startup_timeout: Duration,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let storage = StorageBackend::from_env()?;

        let mongodb = if storage.requires_connection() {
            Some(MongoConfig::from_env()?)
        } else {
            None
        };

        let startup_timeout = Duration::from_secs(env_parse_or("STARTUP_TIMEOUT_SECS", 60)?);

        Ok(Self {
            environment,
            storage,
            mongodb,
            startup_timeout,
        })
    }
}
