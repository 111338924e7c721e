//! Users Domain
//!
//! Persistence core for user accounts.
//!
//! # Features
//!
//! - Validated `User` entity with Argon2 password hashing
//! - Storage-agnostic `UserRepository` contract
//! - In-memory and MongoDB backends
//! - Cooperative cancellation on every call via [`Context`]
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
//! │   Models    │  ← Entity, invariants, password hashing
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{Context, InMemoryUserRepository, UserService};
//!
//! # async fn example() -> domain_users::UserResult<()> {
//! let service = UserService::new(InMemoryUserRepository::new());
//! let ctx = Context::background();
//!
//! let user = service.create_user(&ctx, "Alice", "alice@example.com", "secret1").await?;
//! assert!(service.check_credentials(&ctx, user.id(), "secret1").await?);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use database::{Context, ContextError};
pub use error::{UserError, UserResult};
pub use models::{MIN_PASSWORD_LEN, UpdateUser, User};
pub use crate::mongodb::MongoUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
