//! # Edit Session
//!
//! One open editor on one path: the undo/redo history, the column
//! selection and the store the document came from.
//!
//! Every mutation runs synchronously against the in-memory history. Only
//! `open`, `save` and `close` talk to the store.

use learnpath_model::{Column, IdGenerator, Path};
use learnpath_store::{OwnerId, PathStore};

use crate::navigator::{self, Selection};
use crate::{EditorError, History, Mutation, MutationOutcome};

pub struct EditSession<'s, S: PathStore> {
    store: &'s S,
    owner: OwnerId,
    history: History,
    selection: Selection,
    ids: IdGenerator,
}

impl<'s, S: PathStore> EditSession<'s, S> {
    /// Load `path_id` and seed the history with it
    pub async fn open(store: &'s S, owner: OwnerId, path_id: &str) -> Result<Self, EditorError> {
        let path = store
            .get(&owner, path_id)
            .await?
            .ok_or_else(|| EditorError::PathNotFound(path_id.to_string()))?;

        tracing::debug!(%owner, path_id, "opened editor");

        Ok(Self::from_path(store, owner, path))
    }

    /// Start a session on a document already in hand
    pub fn from_path(store: &'s S, owner: OwnerId, path: Path) -> Self {
        Self {
            store,
            owner,
            history: History::new(path),
            selection: Selection::new(),
            ids: IdGenerator::random(),
        }
    }

    pub fn with_ids(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    /// Current snapshot
    pub fn document(&self) -> &Path {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Apply a mutation as one undo step
    pub fn apply(&mut self, mutation: &Mutation) -> MutationOutcome {
        let outcome = self.history.commit(mutation, &mut self.ids);
        if outcome.is_applied() {
            self.selection.prune(self.history.current());
        }
        outcome
    }

    /// Apply an arbitrary edit to a draft of the current snapshot
    pub fn commit_with<F>(&mut self, description: impl Into<String>, updater: F)
    where
        F: FnOnce(&mut Path),
    {
        self.history.commit_with(description, updater);
        self.selection.prune(self.history.current());
    }

    pub fn undo(&mut self) -> bool {
        let moved = self.history.undo();
        if moved {
            self.selection.prune(self.history.current());
        }
        moved
    }

    pub fn redo(&mut self) -> bool {
        let moved = self.history.redo();
        if moved {
            self.selection.prune(self.history.current());
        }
        moved
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn is_dirty(&self) -> bool {
        self.history.is_dirty()
    }

    pub fn select_item(&mut self, column_id: &str, item_id: &str) {
        self.selection
            .select(self.history.current(), column_id, item_id);
    }

    pub fn step_back(&mut self, column_id: &str) {
        self.selection.step_back(self.history.current(), column_id);
    }

    pub fn visible_columns(&self) -> Vec<&Column> {
        navigator::visible_columns(self.history.current(), &self.selection)
    }

    pub fn last_active_item_id(&self) -> Option<&str> {
        navigator::last_active_item_id(self.history.current(), &self.selection)
    }

    pub fn can_add_column(&self) -> bool {
        navigator::can_add_column(self.history.current(), &self.selection)
    }

    /// Persist the current snapshot.
    ///
    /// On failure the dirty flag stays set so a later `save` can retry.
    pub async fn save(&mut self) -> Result<(), EditorError> {
        let result = self.store.update(&self.owner, self.history.current()).await;
        match result {
            Ok(_) => {
                self.history.mark_saved();
                tracing::debug!(owner = %self.owner, id = %self.document().id, "saved");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(owner = %self.owner, id = %self.document().id, error = %e, "save failed");
                Err(e.into())
            }
        }
    }

    /// Leave the editor, flushing unsaved changes first.
    ///
    /// A failed flush hands the session back, still dirty, so the caller
    /// can retry `save` or `close` instead of losing the edits.
    pub async fn close(mut self) -> Result<Path, (Self, EditorError)> {
        if self.is_dirty() {
            if let Err(e) = self.save().await {
                return Err((self, e));
            }
        }
        Ok(self.history.current().clone())
    }
}
