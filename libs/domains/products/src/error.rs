use database::ContextError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Product already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Product operation aborted: {0}")]
    Cancelled(#[from] ContextError),

    #[error("Database error on product {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    pub(crate) fn database(operation: &'static str, err: impl std::fmt::Display) -> Self {
        ProductError::Database {
            operation,
            message: err.to_string(),
        }
    }
}
