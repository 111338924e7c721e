use crate::{env_or_default, ConfigError, FromEnv};
use std::str::FromStr;

/// Storage backend the repositories are built on, chosen once at startup
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process-local maps; contents are lost on restart
    #[default]
    Memory,
    /// MongoDB collection shared by users and products
    MongoDb,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::MongoDb => "mongodb",
        }
    }

    pub fn requires_connection(&self) -> bool {
        !matches!(self, StorageBackend::Memory)
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" => Ok(StorageBackend::Memory),
            "mongodb" | "mongo" => Ok(StorageBackend::MongoDb),
            other => Err(format!(
                "unknown storage backend '{}', expected 'memory' or 'mongodb'",
                other
            )),
        }
    }
}

impl FromEnv for StorageBackend {
    /// Reads `STORAGE_BACKEND`, defaulting to `memory`
    fn from_env() -> Result<Self, ConfigError> {
        env_or_default("STORAGE_BACKEND", "memory")
            .parse()
            .map_err(|details| ConfigError::ParseError {
                key: "STORAGE_BACKEND".to_string(),
                details,
            })
    }
}
