//! Utilities shared by every storage backend

pub mod context;
pub mod error;
pub mod retry;

pub use context::{Context, ContextError};
pub use error::{DatabaseError, DatabaseResult};
pub use retry::{RetryConfig, retry, retry_with_backoff};
