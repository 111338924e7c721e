//! Product Service - orchestration over a ProductRepository

use database::Context;
use std::sync::Arc;
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service providing the product operations
///
/// Construction input is validated before the repository is touched;
/// repository errors are passed through unchanged.
pub struct ProductService<R: ProductRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: ProductRepository + ?Sized> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self::from_shared(Arc::new(repository))
    }
}

impl<R: ProductRepository + ?Sized> ProductService<R> {
    /// Create a ProductService over an already shared repository
    pub fn from_shared(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create a new product with a generated id
    #[instrument(skip(self, ctx))]
    pub async fn create_product(
        &self,
        ctx: &Context,
        user_id: &str,
        name: &str,
        price: i64,
        stock: i32,
    ) -> ProductResult<Product> {
        let product = Product::new(CreateProduct {
            id: None,
            user_id: user_id.to_string(),
            name: name.to_string(),
            price,
            stock,
        })?;

        self.repository.create(ctx, &product).await?;

        tracing::info!(product_id = %product.id(), "Created product");
        Ok(product)
    }

    /// Get a product by ID
    #[instrument(skip(self, ctx))]
    pub async fn get_product(&self, ctx: &Context, id: &str) -> ProductResult<Product> {
        self.repository.find_by_id(ctx, id).await
    }

    /// All products owned by `user_id`
    #[instrument(skip(self, ctx))]
    pub async fn get_products_by_owner(
        &self,
        ctx: &Context,
        user_id: &str,
    ) -> ProductResult<Vec<Product>> {
        self.repository.find_all_by_user_id(ctx, user_id).await
    }

    /// Update an existing product
    ///
    /// Only the `Some` fields are applied, each through the entity's
    /// validating setter; the first invalid one aborts before any write.
    #[instrument(skip(self, ctx))]
    pub async fn update_product(
        &self,
        ctx: &Context,
        id: &str,
        input: UpdateProduct,
    ) -> ProductResult<Product> {
        let mut product = self.repository.find_by_id(ctx, id).await?;

        if let Some(name) = input.name {
            product.update_name(name)?;
        }
        if let Some(price) = input.price {
            product.update_price(price)?;
        }
        if let Some(stock) = input.stock {
            product.update_stock(stock)?;
        }

        self.repository.update(ctx, &mut product).await?;

        tracing::info!(product_id = %id, "Updated product");
        Ok(product)
    }

    /// Delete a product
    #[instrument(skip(self, ctx))]
    pub async fn delete_product(&self, ctx: &Context, id: &str) -> ProductResult<()> {
        self.repository.delete(ctx, id).await?;

        tracing::info!(product_id = %id, "Deleted product");
        Ok(())
    }
}
