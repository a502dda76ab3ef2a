//! Rules for one owner's set of paths, shared by every backend.

use learnpath_model::{IdGenerator, Path};

use crate::{StoreError, StoreResult};

pub(crate) fn sorted(paths: &[Path]) -> Vec<Path> {
    let mut paths = paths.to_vec();
    paths.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    paths
}

pub(crate) fn find(paths: &[Path], id: &str) -> Option<Path> {
    paths.iter().find(|p| p.id == id).cloned()
}

pub(crate) fn create(paths: &mut Vec<Path>, title: &str, ids: &mut IdGenerator) -> Path {
    let mut path = Path::new(title, ids);
    path.is_major = paths.is_empty();
    paths.push(path.clone());
    path
}

/// Only title and columns are written; `isMajor` and `createdAt` stay as stored
pub(crate) fn update(paths: &mut [Path], incoming: &Path) -> StoreResult<Path> {
    incoming.validate()?;

    let stored = paths
        .iter_mut()
        .find(|p| p.id == incoming.id)
        .ok_or_else(|| StoreError::NotFound(incoming.id.clone()))?;

    stored.title = incoming.title.clone();
    stored.columns = incoming.columns.clone();
    Ok(stored.clone())
}

pub(crate) fn delete(paths: &mut Vec<Path>, id: &str) -> StoreResult<()> {
    let before = paths.len();
    paths.retain(|p| p.id != id);
    if paths.len() == before {
        return Err(StoreError::NotFound(id.to_string()));
    }
    Ok(())
}

/// Fails without touching anything when `id` is not in the collection
pub(crate) fn set_major(paths: &mut [Path], id: &str) -> StoreResult<()> {
    if !paths.iter().any(|p| p.id == id) {
        return Err(StoreError::NotFound(id.to_string()));
    }
    for path in paths.iter_mut() {
        path.is_major = path.id == id;
    }
    Ok(())
}
