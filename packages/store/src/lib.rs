//! # Learnpath Store
//!
//! Durable storage for path documents, scoped to an owning user.
//!
//! ```text
//! owner ─┬─ Path (isMajor)
//!        ├─ Path
//!        └─ Path
//! ```
//!
//! Two backends share the same collection rules:
//! - [`MemoryStore`]: in-process map, for tests and embedding
//! - [`JsonFileStore`]: one JSON file per owner under a data directory

mod collection;
mod error;
mod file;
mod memory;

pub use error::{StoreError, StoreResult};
pub use file::JsonFileStore;
pub use memory::MemoryStore;

use std::fmt;
use std::future::Future;

use learnpath_model::Path;
use serde::{Deserialize, Serialize};

/// Id of the user owning a set of paths
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OwnerId {
    fn from(s: &str) -> Self {
        OwnerId(s.to_string())
    }
}

impl From<String> for OwnerId {
    fn from(s: String) -> Self {
        OwnerId(s)
    }
}

/// Persistence collaborator used by the editor
///
/// Every call is scoped by owner; a path belonging to another owner is
/// reported as not found.
pub trait PathStore: Send + Sync {
    /// All paths of `owner`, newest first
    fn list(&self, owner: &OwnerId) -> impl Future<Output = StoreResult<Vec<Path>>> + Send;

    fn get(
        &self,
        owner: &OwnerId,
        id: &str,
    ) -> impl Future<Output = StoreResult<Option<Path>>> + Send;

    /// Create a path with a single empty root column. The owner's first
    /// path becomes the major path.
    fn create(&self, owner: &OwnerId, title: &str)
        -> impl Future<Output = StoreResult<Path>> + Send;

    /// Write title and columns of an existing path
    fn update(&self, owner: &OwnerId, path: &Path)
        -> impl Future<Output = StoreResult<Path>> + Send;

    fn delete(&self, owner: &OwnerId, id: &str) -> impl Future<Output = StoreResult<()>> + Send;

    /// Make `id` the only major path of `owner`
    fn set_major(&self, owner: &OwnerId, id: &str)
        -> impl Future<Output = StoreResult<()>> + Send;
}
