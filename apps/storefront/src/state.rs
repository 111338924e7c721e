//! Application state management.
//!
//! The storage backend is resolved here exactly once. Services receive the
//! chosen repositories as trait objects, so nothing downstream knows which
//! backend is in use.

use core_config::storage::StorageBackend;
use database::Context;
use database::mongodb::{Client, check_health, connect_from_config_with_retry};
use domain_products::{
    InMemoryProductRepository, MongoProductRepository, ProductRepository, ProductService,
};
use domain_users::{InMemoryUserRepository, MongoUserRepository, UserRepository, UserService};
use eyre::eyre;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;

pub type Users = UserService<dyn UserRepository>;
pub type Products = ProductService<dyn ProductRepository>;

/// Shared application state.
///
/// Cloning is inexpensive (Arc clones); every clone talks to the same storage.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: Config,
    pub users: Users,
    pub products: Products,
    /// MongoDB client when that backend is active (shares the connection pool)
    pub mongo_client: Option<Client>,
}

impl AppState {
    /// Connect the configured backend and build the services on top of it
    ///
    /// `ctx` bounds the whole startup, including connection retries.
    pub async fn build(ctx: &Context, config: Config) -> eyre::Result<Self> {
        let (user_repository, product_repository, mongo_client): (
            Arc<dyn UserRepository>,
            Arc<dyn ProductRepository>,
            Option<Client>,
        ) = match config.storage {
            StorageBackend::Memory => {
                info!("Using in-memory storage; data lives as long as the process");
                (
                    Arc::new(InMemoryUserRepository::new()),
                    Arc::new(InMemoryProductRepository::new()),
                    None,
                )
            }
            StorageBackend::MongoDb => {
                let mongodb = config
                    .mongodb
                    .as_ref()
                    .ok_or_else(|| eyre!("MongoDB backend selected without MongoDB settings"))?;

                info!("Connecting to MongoDB at {}", mongodb.url());
                let client = connect_from_config_with_retry(ctx, mongodb, None).await?;
                let db = client.database(mongodb.database());

                let products = MongoProductRepository::new(&db, mongodb.collection());
                products.init_indexes(ctx).await?;

                info!(
                    database = %mongodb.database(),
                    collection = %mongodb.collection(),
                    "Using MongoDB storage"
                );
                (
                    Arc::new(MongoUserRepository::new(&db, mongodb.collection())),
                    Arc::new(products),
                    Some(client),
                )
            }
        };

        Ok(Self {
            config,
            users: UserService::from_shared(user_repository),
            products: ProductService::from_shared(product_repository),
            mongo_client,
        })
    }

    /// Whether the storage backend is reachable
    ///
    /// The in-memory backend is always healthy.
    pub async fn is_healthy(&self, ctx: &Context) -> bool {
        match &self.mongo_client {
            Some(client) => check_health(ctx, client).await,
            None => true,
        }
    }
}
