//! Storage plumbing shared by the domain crates
//!
//! - [`common::Context`]: cooperative cancellation and deadlines threaded
//!   through every repository call
//! - [`common::DatabaseError`]: connection-level failures
//! - [`common::retry`]: exponential backoff used while connecting
//! - [`mongodb`] (feature `mongodb`): config, connector, health checks and
//!   driver error classification
//!
//! # Features
//!
//! - `mongodb` - MongoDB support
//! - `config` - `core_config::FromEnv` for the connection configs
//! - `all` - everything above
//!
//! # Example
//!
//! ```ignore
//! use database::{Context, mongodb};
//! use std::time::Duration;
//!
//! let config = mongodb::MongoConfig::with_database("mongodb://localhost:27017", "shop");
//! let ctx = Context::background().with_timeout(Duration::from_secs(60));
//! let client = mongodb::connect_from_config_with_retry(&ctx, &config, None).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{Context, ContextError, DatabaseError, DatabaseResult};
