use thiserror::Error;

/// All the ways things can go wrong in AINav
#[derive(Error, Debug)]
pub enum Error {
    /// A store handle was used after its session ended, or was never bound
    /// to one. This is an integration bug, not a user error.
    #[error("{0} store used outside an active session")]
    OutsideSession(&'static str),

    #[error("Catalog item not found: {0}")]
    NotFound(String),

    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    Storage(#[from] ainav_storage::StorageError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
