//! JSON file backend.
//!
//! Layout: `<data_dir>/<owner>.json` holds the owner's paths as a JSON
//! array. Writes go to a temp file that is renamed over the original, and a
//! single mutex serializes every read-modify-write cycle.

use std::path::{Path as FsPath, PathBuf};

use learnpath_model::{IdGenerator, Path};
use tokio::sync::Mutex;

use crate::{collection, OwnerId, PathStore, StoreError, StoreResult};

#[derive(Debug)]
pub struct JsonFileStore {
    data_dir: PathBuf,
    /// Store-wide lock held for every operation, reads included; it also
    /// owns the id generator used by `create`
    lock: Mutex<IdGenerator>,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_ids(data_dir, IdGenerator::random())
    }

    pub fn with_ids(data_dir: impl Into<PathBuf>, ids: IdGenerator) -> Self {
        Self {
            data_dir: data_dir.into(),
            lock: Mutex::new(ids),
        }
    }

    pub fn data_dir(&self) -> &FsPath {
        &self.data_dir
    }

    fn owner_file(&self, owner: &OwnerId) -> StoreResult<PathBuf> {
        let name = owner.as_str();
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidOwner(name.to_string()));
        }
        Ok(self.data_dir.join(format!("{}.json", name)))
    }

    async fn read_owner(&self, owner: &OwnerId) -> StoreResult<Vec<Path>> {
        let file = self.owner_file(owner)?;
        match tokio::fs::read_to_string(&file).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_owner(&self, owner: &OwnerId, paths: &[Path]) -> StoreResult<()> {
        let file = self.owner_file(owner)?;
        tokio::fs::create_dir_all(&self.data_dir).await?;

        let content = serde_json::to_string_pretty(paths)?;
        write_atomic(&file, content).await
    }
}

/// Write through a sibling temp file renamed over `file`. The temp file
/// never outlives a failed rename.
async fn write_atomic(file: &FsPath, content: String) -> StoreResult<()> {
    let tmp = file.with_extension("json.tmp");
    tokio::fs::write(&tmp, content).await?;
    if let Err(e) = tokio::fs::rename(&tmp, file).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    Ok(())
}

impl PathStore for JsonFileStore {
    async fn list(&self, owner: &OwnerId) -> StoreResult<Vec<Path>> {
        let _guard = self.lock.lock().await;
        let paths = self.read_owner(owner).await?;
        Ok(collection::sorted(&paths))
    }

    async fn get(&self, owner: &OwnerId, id: &str) -> StoreResult<Option<Path>> {
        let _guard = self.lock.lock().await;
        let paths = self.read_owner(owner).await?;
        Ok(collection::find(&paths, id))
    }

    async fn create(&self, owner: &OwnerId, title: &str) -> StoreResult<Path> {
        let mut ids = self.lock.lock().await;
        let mut paths = self.read_owner(owner).await?;
        let path = collection::create(&mut paths, title, &mut ids);
        self.write_owner(owner, &paths).await?;
        tracing::info!(%owner, id = %path.id, "created path");
        Ok(path)
    }

    async fn update(&self, owner: &OwnerId, path: &Path) -> StoreResult<Path> {
        let _guard = self.lock.lock().await;
        let mut paths = self.read_owner(owner).await?;
        let stored = collection::update(&mut paths, path)?;
        self.write_owner(owner, &paths).await?;
        tracing::info!(%owner, id = %stored.id, "updated path");
        Ok(stored)
    }

    async fn delete(&self, owner: &OwnerId, id: &str) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        let mut paths = self.read_owner(owner).await?;
        collection::delete(&mut paths, id)?;
        self.write_owner(owner, &paths).await?;
        tracing::info!(%owner, id, "deleted path");
        Ok(())
    }

    async fn set_major(&self, owner: &OwnerId, id: &str) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        let mut paths = self.read_owner(owner).await?;
        collection::set_major(&mut paths, id)?;
        self.write_owner(owner, &paths).await?;
        tracing::info!(%owner, id, "set major path");
        Ok(())
    }
}
