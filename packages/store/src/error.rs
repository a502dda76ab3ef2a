use learnpath_model::ModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Invalid path document: {0}")]
    Invalid(#[from] ModelError),

    #[error("Invalid owner id: {0:?}")]
    InvalidOwner(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
