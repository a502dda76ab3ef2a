//! Error types for the editor

use learnpath_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
