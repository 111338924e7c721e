use crate::common::ContextError;

/// Connection-level database error
///
/// Repository operations report through their domain's error type; this one
/// covers establishing connections.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// MongoDB driver error
    #[cfg(feature = "mongodb")]
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// Connection failed after retries
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The caller gave up before the operation finished
    #[error("Operation aborted: {0}")]
    Cancelled(#[from] ContextError),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
