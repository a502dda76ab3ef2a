use std::collections::HashMap;

use learnpath_model::{IdGenerator, Path};
use tokio::sync::RwLock;

use crate::{collection, OwnerId, PathStore, StoreError, StoreResult};

#[derive(Debug, Default)]
struct MemoryState {
    owners: HashMap<OwnerId, Vec<Path>>,
    ids: IdGenerator,
}

/// In-process store; every write holds the lock for the whole operation
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose new paths get predictable ids
    pub fn with_ids(ids: IdGenerator) -> Self {
        Self {
            state: RwLock::new(MemoryState {
                owners: HashMap::new(),
                ids,
            }),
        }
    }

    /// Insert a complete document (imports, fixtures). An inserted major
    /// path takes the major flag from the owner's other paths.
    pub async fn insert(&self, owner: &OwnerId, path: Path) -> StoreResult<()> {
        path.validate()?;
        let mut state = self.state.write().await;
        let paths = state.owners.entry(owner.clone()).or_default();
        paths.retain(|p| p.id != path.id);

        let major_id = path.is_major.then(|| path.id.clone());
        paths.push(path);
        if let Some(id) = major_id {
            collection::set_major(paths, &id)?;
        }
        Ok(())
    }
}

impl PathStore for MemoryStore {
    async fn list(&self, owner: &OwnerId) -> StoreResult<Vec<Path>> {
        let state = self.state.read().await;
        Ok(state
            .owners
            .get(owner)
            .map(|paths| collection::sorted(paths))
            .unwrap_or_default())
    }

    async fn get(&self, owner: &OwnerId, id: &str) -> StoreResult<Option<Path>> {
        let state = self.state.read().await;
        Ok(state
            .owners
            .get(owner)
            .and_then(|paths| collection::find(paths, id)))
    }

    async fn create(&self, owner: &OwnerId, title: &str) -> StoreResult<Path> {
        let mut state = self.state.write().await;
        let MemoryState { owners, ids } = &mut *state;
        let path = collection::create(owners.entry(owner.clone()).or_default(), title, ids);
        tracing::info!(%owner, id = %path.id, "created path");
        Ok(path)
    }

    async fn update(&self, owner: &OwnerId, path: &Path) -> StoreResult<Path> {
        let mut state = self.state.write().await;
        let paths = state
            .owners
            .get_mut(owner)
            .ok_or_else(|| StoreError::NotFound(path.id.clone()))?;
        let stored = collection::update(paths, path)?;
        tracing::info!(%owner, id = %stored.id, "updated path");
        Ok(stored)
    }

    async fn delete(&self, owner: &OwnerId, id: &str) -> StoreResult<()> {
        let mut state = self.state.write().await;
        let paths = state
            .owners
            .get_mut(owner)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        collection::delete(paths, id)?;
        tracing::info!(%owner, id, "deleted path");
        Ok(())
    }

    async fn set_major(&self, owner: &OwnerId, id: &str) -> StoreResult<()> {
        let mut state = self.state.write().await;
        let paths = state
            .owners
            .get_mut(owner)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        collection::set_major(paths, id)?;
        tracing::info!(%owner, id, "set major path");
        Ok(())
    }
}
