use thiserror::Error;

#[derive(Error, Debug)]
pub enum WashError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No customers in queue")]
    EmptyQueue,

    #[error("Storage unavailable: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Invalid backup document: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WashError {
    /// Persistence failures are non-fatal: in-memory state stays valid.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::StorageUnavailable(_))
    }
}

pub type WashResult<T> = Result<T, WashError>;
