#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or};

/// Collection used when none is configured
pub const DEFAULT_COLLECTION: &str = "documents";

/// MongoDB connection settings
///
/// Besides the usual connection knobs this carries the name of the single
/// collection the document repositories share, and optional credentials
/// that are applied on top of whatever the URL specifies.
///
/// # Example
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "shop")
///     .with_collection("entities")
///     .with_credentials("shop", "secret");
/// ```
#[derive(Clone)]
pub struct MongoConfig {
    /// Connection string: mongodb://[username:password@]host[:port][/database][?options]
    pub url: String,

    /// Database name
    pub database: String,

    /// Collection holding every entity kind
    pub collection: String,

    /// Username for authentication, overrides the URL's
    pub username: Option<String>,

    /// Password for authentication, overrides the URL's
    pub password: Option<String>,

    /// Application name reported in server logs
    pub app_name: Option<String>,

    /// Maximum number of pooled connections
    pub max_pool_size: u32,

    /// Minimum number of pooled connections
    pub min_pool_size: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Server selection timeout in seconds
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// Config for `url` with the `default` database
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Config for `url` using `database`
    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn with_pool_size(mut self, max_pool_size: u32, min_pool_size: u32) -> Self {
        self.max_pool_size = max_pool_size;
        self.min_pool_size = min_pool_size;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn has_credentials(&self) -> bool {
        self.username.is_some()
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            database: "default".to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            username: None,
            password: None,
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }
}

// The password must never end up in logs
impl std::fmt::Debug for MongoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoConfig")
            .field("url", &self.url)
            .field("database", &self.database)
            .field("collection", &self.collection)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("app_name", &self.app_name)
            .field("max_pool_size", &self.max_pool_size)
            .field("min_pool_size", &self.min_pool_size)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field(
                "server_selection_timeout_secs",
                &self.server_selection_timeout_secs,
            )
            .finish()
    }
}

/// Load MongoConfig from environment variables
///
/// - `MONGODB_URL` or `MONGO_URL` (required)
/// - `MONGODB_DATABASE` or `MONGO_DATABASE` (required)
/// - `MONGODB_COLLECTION` (default: `documents`)
/// - `MONGODB_USERNAME` / `MONGODB_PASSWORD` (optional, both or neither)
/// - `MONGODB_APP_NAME` (optional)
/// - `MONGODB_MAX_POOL_SIZE` (default: 100)
/// - `MONGODB_MIN_POOL_SIZE` (default: 5)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (default: 10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (default: 30)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("MONGODB_URL")
            .or_else(|_| std::env::var("MONGO_URL"))
            .map_err(|_| ConfigError::MissingEnvVar("MONGODB_URL or MONGO_URL".to_string()))?;

        let database = std::env::var("MONGODB_DATABASE")
            .or_else(|_| std::env::var("MONGO_DATABASE"))
            .map_err(|_| {
                ConfigError::MissingEnvVar("MONGODB_DATABASE or MONGO_DATABASE".to_string())
            })?;

        let username = std::env::var("MONGODB_USERNAME").ok();
        let password = std::env::var("MONGODB_PASSWORD").ok();
        if username.is_some() != password.is_some() {
            return Err(ConfigError::ParseError {
                key: "MONGODB_USERNAME".to_string(),
                details: "MONGODB_USERNAME and MONGODB_PASSWORD must be set together".to_string(),
            });
        }

        Ok(Self {
            url,
            database,
            collection: env_or_default("MONGODB_COLLECTION", DEFAULT_COLLECTION),
            username,
            password,
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            max_pool_size: env_parse_or("MONGODB_MAX_POOL_SIZE", 100)?,
            min_pool_size: env_parse_or("MONGODB_MIN_POOL_SIZE", 5)?,
            connect_timeout_secs: env_parse_or("MONGODB_CONNECT_TIMEOUT_SECS", 10)?,
            server_selection_timeout_secs: env_parse_or(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                30,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mongo_config_new() {
        let config = MongoConfig::new("mongodb://localhost:27017");
        assert_eq!(config.url(), "mongodb://localhost:27017");
        assert_eq!(config.database(), "default");
        assert_eq!(config.collection(), DEFAULT_COLLECTION);
        assert!(!config.has_credentials());
        assert_eq!(config.max_pool_size, 100);
        assert_eq!(config.min_pool_size, 5);
    }

    #[test]
    fn test_mongo_config_builders() {
        let config = MongoConfig::with_database("mongodb://db:27017", "shop")
            .with_collection("entities")
            .with_credentials("shop", "secret")
            .with_app_name("storefront")
            .with_pool_size(50, 10);

        assert_eq!(config.database(), "shop");
        assert_eq!(config.collection(), "entities");
        assert_eq!(config.username.as_deref(), Some("shop"));
        assert_eq!(config.password.as_deref(), Some("secret"));
        assert_eq!(config.app_name.as_deref(), Some("storefront"));
        assert_eq!(config.max_pool_size, 50);
        assert_eq!(config.min_pool_size, 10);
    }

    #[test]
    fn test_mongo_config_debug_redacts_password() {
        let config = MongoConfig::new("mongodb://db:27017").with_credentials("shop", "hunter22");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter22"));
        assert!(rendered.contains("<redacted>"));
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("testdb")),
                ("MONGODB_COLLECTION", Some("entities")),
                ("MONGODB_USERNAME", Some("app")),
                ("MONGODB_PASSWORD", Some("pw")),
                ("MONGODB_MAX_POOL_SIZE", None::<&str>),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.url(), "mongodb://localhost:27017");
                assert_eq!(config.database(), "testdb");
                assert_eq!(config.collection(), "entities");
                assert!(config.has_credentials());
                assert_eq!(config.max_pool_size, 100);
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env_fallback_names() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", Some("mongodb://fallback:27017")),
                ("MONGODB_DATABASE", None::<&str>),
                ("MONGO_DATABASE", Some("fallbackdb")),
                ("MONGODB_COLLECTION", None::<&str>),
                ("MONGODB_USERNAME", None::<&str>),
                ("MONGODB_PASSWORD", None::<&str>),
            ],
            || {
                let config = MongoConfig::from_env().unwrap();
                assert_eq!(config.url(), "mongodb://fallback:27017");
                assert_eq!(config.database(), "fallbackdb");
                assert_eq!(config.collection(), DEFAULT_COLLECTION);
                assert!(!config.has_credentials());
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env_missing_url() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", None::<&str>),
                ("MONGODB_DATABASE", Some("testdb")),
            ],
            || {
                let err = MongoConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("MONGODB_URL"));
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env_rejects_half_credentials() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("testdb")),
                ("MONGODB_USERNAME", Some("app")),
                ("MONGODB_PASSWORD", None::<&str>),
            ],
            || {
                assert!(MongoConfig::from_env().is_err());
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_mongo_config_from_env_bad_pool_size() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("testdb")),
                ("MONGODB_USERNAME", None::<&str>),
                ("MONGODB_PASSWORD", None::<&str>),
                ("MONGODB_MAX_POOL_SIZE", Some("lots")),
            ],
            || {
                let err = MongoConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("MONGODB_MAX_POOL_SIZE"));
            },
        );
    }
}
