//! Error types for devlog-storage

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Repository not found: {0}")]
    RepositoryNotFound(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<StorageError> for devlog_core::Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(e) => devlog_core::Error::Io(e),
            StorageError::Other(e) => devlog_core::Error::Other(e),
            other => devlog_core::Error::Storage(other.to_string()),
        }
    }
}
