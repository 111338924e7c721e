use async_trait::async_trait;
use database::Context;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::Product;

/// Repository trait for Product persistence
///
/// This trait defines the data access interface for products.
/// Implementations can use different storage backends (in-memory, MongoDB).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Store a new product; `AlreadyExists` if the id is taken
    async fn create(&self, ctx: &Context, product: &Product) -> ProductResult<()>;

    /// Get a product by ID; `NotFound` if absent
    async fn find_by_id(&self, ctx: &Context, id: &str) -> ProductResult<Product>;

    /// Every product owned by `user_id`, in no particular order
    async fn find_all_by_user_id(&self, ctx: &Context, user_id: &str)
        -> ProductResult<Vec<Product>>;

    /// Replace a stored product wholesale; `NotFound` if absent
    ///
    /// Backends may refresh `updated_at` on `product` before writing.
    async fn update(&self, ctx: &Context, product: &mut Product) -> ProductResult<()>;

    /// Delete a product by ID; `NotFound` if absent
    async fn delete(&self, ctx: &Context, id: &str) -> ProductResult<()>;
}

/// In-memory implementation of ProductRepository
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<String, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, ctx: &Context, product: &Product) -> ProductResult<()> {
        ctx.check()?;
        let mut products = self.products.write().await;

        if products.contains_key(product.id()) {
            return Err(ProductError::AlreadyExists(product.id().to_string()));
        }

        products.insert(product.id().to_string(), product.clone());

        tracing::debug!(product_id = %product.id(), user_id = %product.user_id(), "Stored product");
        Ok(())
    }

    async fn find_by_id(&self, ctx: &Context, id: &str) -> ProductResult<Product> {
        ctx.check()?;
        let products = self.products.read().await;

        products
            .get(id)
            .cloned()
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    async fn find_all_by_user_id(
        &self,
        ctx: &Context,
        user_id: &str,
    ) -> ProductResult<Vec<Product>> {
        ctx.check()?;
        let products = self.products.read().await;

        Ok(products
            .values()
            .filter(|p| p.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn update(&self, ctx: &Context, product: &mut Product) -> ProductResult<()> {
        ctx.check()?;
        let mut products = self.products.write().await;

        match products.get_mut(product.id()) {
            Some(stored) => {
                *stored = product.clone();
                tracing::debug!(product_id = %product.id(), "Replaced product");
                Ok(())
            }
            None => Err(ProductError::NotFound(product.id().to_string())),
        }
    }

    async fn delete(&self, ctx: &Context, id: &str) -> ProductResult<()> {
        ctx.check()?;
        let mut products = self.products.write().await;

        match products.remove(id) {
            Some(_) => {
                tracing::debug!(product_id = %id, "Removed product");
                Ok(())
            }
            None => Err(ProductError::NotFound(id.to_string())),
        }
    }
}
