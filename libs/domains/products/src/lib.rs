//! Products Domain
//!
//! Persistence core for products owned by users.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← Orchestration, partial updates
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory / MongoDB)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entity, invariants
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{mongodb::MongoProductRepository, Context, ProductService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a MongoDB client
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("shop");
//!
//! // Create a repository and service
//! let repository = MongoProductRepository::new(&db, "documents");
//! let ctx = Context::background();
//! repository.init_indexes(&ctx).await?;
//!
//! let service = ProductService::new(repository);
//! let product = service.create_product(&ctx, "owner-1", "Widget", 1999, 10).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use crate::mongodb::MongoProductRepository;
pub use database::{Context, ContextError};
pub use error::{ProductError, ProductResult};
pub use models::{CreateProduct, Product, UpdateProduct};
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
