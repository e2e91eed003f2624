/// The store could not serve a request. Every variant ends up as a 500
/// with the underlying cause in the message.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to connect to database: {var} is not set")]
    MissingConfig { var: &'static str },
    #[error("Failed to connect to database: {message}")]
    InvalidConfig { message: String },
    #[error("Failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("Failed to retrieve scores: {0}")]
    Fetch(#[source] sqlx::Error),
    #[error("Failed to insert score: {0}")]
    Insert(#[source] sqlx::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
