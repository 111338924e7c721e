use mongodb::{
    Client,
    bson::doc,
    options::ClientOptions,
};
use std::time::Duration;
use tracing::info;

use super::MongoConfig;
use crate::common::{Context, DatabaseError, DatabaseResult, RetryConfig, retry, retry_with_backoff};

/// Connect to MongoDB with default pool settings and verify with a ping
///
/// # Example
/// ```ignore
/// use database::{Context, mongodb::connect};
///
/// let client = connect(&Context::background(), "mongodb://localhost:27017").await?;
/// ```
pub async fn connect(ctx: &Context, url: &str) -> DatabaseResult<Client> {
    connect_from_config(ctx, &MongoConfig::new(url)).await
}

/// Connect using a [`MongoConfig`]
///
/// Applies pool sizes, timeouts, app name and credentials from the config,
/// then pings the configured database so a bad URL or bad credentials fail
/// here rather than on the first repository call.
pub async fn connect_from_config(ctx: &Context, config: &MongoConfig) -> DatabaseResult<Client> {
    info!(
        url = %config.url,
        database = %config.database,
        authenticated = config.has_credentials(),
        "Attempting to connect to MongoDB"
    );

    let mut options = ctx.run(ClientOptions::parse(&config.url)).await??;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    if let (Some(username), Some(password)) = (&config.username, &config.password) {
        let mut credential = options.credential.take().unwrap_or_default();
        credential.username = Some(username.clone());
        credential.password = Some(password.clone());
        options.credential = Some(credential);
    }

    let client = Client::with_options(options)?;

    ctx.run(client.database(&config.database).run_command(doc! { "ping": 1 }))
        .await?
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!(database = %config.database, "Successfully connected to MongoDB");
    Ok(client)
}

/// Connect to `url` with exponential backoff
///
/// `None` uses [`RetryConfig::default`] (3 retries from 100ms).
pub async fn connect_with_retry(
    ctx: &Context,
    url: &str,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<Client> {
    let config = MongoConfig::new(url);
    connect_from_config_with_retry(ctx, &config, retry_config).await
}

/// Connect from config with exponential backoff
///
/// # Example
/// ```ignore
/// use database::{Context, common::RetryConfig, mongodb::{MongoConfig, connect_from_config_with_retry}};
/// use core_config::FromEnv;
///
/// let config = MongoConfig::from_env()?;
/// let retry_config = RetryConfig::new().with_max_retries(5);
/// let client = connect_from_config_with_retry(&Context::background(), &config, Some(retry_config)).await?;
/// ```
pub async fn connect_from_config_with_retry(
    ctx: &Context,
    config: &MongoConfig,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<Client> {
    match retry_config {
        Some(retry_config) => {
            retry_with_backoff(ctx, || connect_from_config(ctx, config), retry_config).await
        }
        None => retry(ctx, || connect_from_config(ctx, config)).await,
    }
}
