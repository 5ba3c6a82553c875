use thiserror::Error;

/// Result type for slot storage operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// Everything that can go wrong reading or writing a slot
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage is unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid slot key: {0:?}")]
    InvalidKey(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
