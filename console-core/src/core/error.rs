use thiserror::Error;

/// Main error type for console operations
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Password entered incorrectly {max_retry_count} times, account locked for {lock_time} minutes")]
    RetryLimitExceeded { max_retry_count: u32, lock_time: u64 },

    /// Deliberately does not reveal whether the user or the password was wrong
    #[error("User does not exist or password is incorrect")]
    InvalidCredentials,

    #[error("Account disabled")]
    AccountDisabled,

    #[error("'{0}' is assigned and cannot be deleted")]
    DictTypeAssigned(String),

    #[error("Dictionary type '{0}' already exists")]
    DictTypeNotUnique(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Result type alias for console operations
pub type Result<T> = std::result::Result<T, ConsoleError>;
