//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use database::mongodb::is_duplicate_key;
use database::Context;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{next_timestamp, Product};
use crate::repository::ProductRepository;

/// Discriminator value for product documents
pub const PRODUCT_KIND: &str = "product";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ProductDocument {
    #[serde(rename = "_id")]
    id: String,
    kind: String,
    user_id: String,
    name: String,
    price: i64,
    stock: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<&Product> for ProductDocument {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id().to_string(),
            kind: PRODUCT_KIND.to_string(),
            user_id: product.user_id().to_string(),
            name: product.name().to_string(),
            price: product.price(),
            stock: product.stock(),
            created_at: product.created_at(),
            updated_at: product.updated_at(),
        }
    }
}

impl From<ProductDocument> for Product {
    fn from(document: ProductDocument) -> Self {
        Product::reconstitute(
            document.id,
            document.user_id,
            document.name,
            document.price,
            document.stock,
            document.created_at,
            document.updated_at,
        )
    }
}

/// MongoDB implementation of the ProductRepository
///
/// Products live in the collection shared with the other entity kinds,
/// tagged with `kind: "product"`.
#[derive(Clone)]
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    /// Use `collection_name` in `db` as the shared document collection
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<ProductDocument>(collection_name);
        Self { collection }
    }

    /// Initialize indexes for the owner lookup
    pub async fn init_indexes(&self, ctx: &Context) -> ProductResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "kind": 1, "user_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("idx_kind_user_id".to_string())
                    .build(),
            )
            .build();

        ctx.run(self.collection.create_index(index))
            .await?
            .map_err(|e| ProductError::database("init_indexes", e))?;

        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    fn by_id(id: &str) -> Document {
        doc! { "_id": id, "kind": PRODUCT_KIND }
    }

    fn by_owner(user_id: &str) -> Document {
        doc! { "kind": PRODUCT_KIND, "user_id": user_id }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, ctx, product), fields(product_id = %product.id()))]
    async fn create(&self, ctx: &Context, product: &Product) -> ProductResult<()> {
        let document = ProductDocument::from(product);

        match ctx.run(self.collection.insert_one(&document)).await? {
            Ok(_) => {
                tracing::info!("Product created successfully");
                Ok(())
            }
            Err(e) if is_duplicate_key(&e) => Err(ProductError::AlreadyExists(document.id)),
            Err(e) => Err(ProductError::database("create", e)),
        }
    }

    #[instrument(skip(self, ctx))]
    async fn find_by_id(&self, ctx: &Context, id: &str) -> ProductResult<Product> {
        ctx.run(self.collection.find_one(Self::by_id(id)))
            .await?
            .map_err(|e| ProductError::database("find_by_id", e))?
            .map(Product::from)
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    #[instrument(skip(self, ctx))]
    async fn find_all_by_user_id(
        &self,
        ctx: &Context,
        user_id: &str,
    ) -> ProductResult<Vec<Product>> {
        let documents = ctx
            .run(async {
                let cursor = self.collection.find(Self::by_owner(user_id)).await?;
                cursor.try_collect::<Vec<ProductDocument>>().await
            })
            .await?
            .map_err(|e| ProductError::database("find_all_by_user_id", e))?;

        Ok(documents.into_iter().map(Product::from).collect())
    }

    #[instrument(skip(self, ctx, product), fields(product_id = %product.id()))]
    async fn update(&self, ctx: &Context, product: &mut Product) -> ProductResult<()> {
        let mut document = ProductDocument::from(&*product);
        document.updated_at = next_timestamp(product.updated_at());

        let result = ctx
            .run(
                self.collection
                    .replace_one(Self::by_id(product.id()), &document),
            )
            .await?
            .map_err(|e| ProductError::database("update", e))?;

        if result.matched_count == 0 {
            return Err(ProductError::NotFound(document.id));
        }

        product.set_updated_at(document.updated_at);
        tracing::info!("Product updated successfully");
        Ok(())
    }

    #[instrument(skip(self, ctx))]
    async fn delete(&self, ctx: &Context, id: &str) -> ProductResult<()> {
        let result = ctx
            .run(self.collection.delete_one(Self::by_id(id)))
            .await?
            .map_err(|e| ProductError::database("delete", e))?;

        if result.deleted_count == 0 {
            return Err(ProductError::NotFound(id.to_string()));
        }

        tracing::info!("Product deleted successfully");
        Ok(())
    }
}
