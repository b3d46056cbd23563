use super::ValidationError;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("invalid high score: {0}")]
    Validation(#[from] ValidationError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("store is unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
