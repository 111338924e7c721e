use database::ContextError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("User already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("User operation aborted: {0}")]
    Cancelled(#[from] ContextError),

    #[error("Database error on user {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    pub(crate) fn database(operation: &'static str, err: impl std::fmt::Display) -> Self {
        UserError::Database {
            operation,
            message: err.to_string(),
        }
    }
}
