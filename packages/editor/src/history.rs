//! # Undo/Redo History
//!
//! Linear history of immutable document snapshots.
//!
//! ## Design
//!
//! - Entry 0 is the document as loaded; the cursor starts there
//! - A commit clones the snapshot under the cursor, mutates the clone,
//!   drops everything after the cursor and appends the clone
//! - Undo/redo only move the cursor
//! - Any transition marks the history dirty; only [`History::mark_saved`]
//!   clears it
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new(path);
//! let mut ids = IdGenerator::random();
//!
//! history.commit(&Mutation::AddItem { column_id }, &mut ids);
//! history.undo();
//! history.redo();
//! ```

use learnpath_model::{IdGenerator, Path};

use crate::{Mutation, MutationOutcome};

/// One snapshot in the history
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub snapshot: Path,

    /// What produced this snapshot (`None` for the loaded document)
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    index: usize,
    dirty: bool,

    /// Maximum number of snapshots kept (0 = unlimited)
    max_levels: usize,
}

impl History {
    /// Seed a history with the loaded document at index 0
    pub fn new(initial: Path) -> Self {
        Self::with_max_levels(initial, 0)
    }

    pub fn with_max_levels(initial: Path, max_levels: usize) -> Self {
        Self {
            entries: vec![HistoryEntry {
                snapshot: initial,
                description: None,
            }],
            index: 0,
            dirty: false,
            max_levels,
        }
    }

    /// Apply one engine mutation as a new snapshot.
    ///
    /// No-ops and rejections leave the history (and dirty flag) untouched.
    pub fn commit(&mut self, mutation: &Mutation, ids: &mut IdGenerator) -> MutationOutcome {
        let (next, outcome) = mutation.applied_to(self.current(), ids);

        match &outcome {
            MutationOutcome::Applied => {
                tracing::debug!(mutation = mutation.name(), "committed");
                self.push(next, mutation.name());
            }
            MutationOutcome::Noop(reason) => {
                tracing::debug!(mutation = mutation.name(), %reason, "skipped");
            }
            MutationOutcome::Rejected(reason) => {
                tracing::warn!(mutation = mutation.name(), %reason, "rejected");
            }
        }

        outcome
    }

    /// Apply an arbitrary edit to a draft of the current snapshot and record it
    pub fn commit_with<F>(&mut self, description: impl Into<String>, updater: F)
    where
        F: FnOnce(&mut Path),
    {
        let mut draft = self.current().clone();
        updater(&mut draft);
        self.push(draft, description);
    }

    fn push(&mut self, snapshot: Path, description: impl Into<String>) {
        // New edit invalidates the redo future
        self.entries.truncate(self.index + 1);
        self.entries.push(HistoryEntry {
            snapshot,
            description: Some(description.into()),
        });
        self.index = self.entries.len() - 1;

        if self.max_levels > 0 && self.entries.len() > self.max_levels {
            let excess = self.entries.len() - self.max_levels;
            self.entries.drain(..excess);
            self.index -= excess;
        }

        self.dirty = true;
    }

    /// Step back one snapshot; returns whether the cursor moved
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.index -= 1;
        self.dirty = true;
        tracing::debug!(index = self.index, "undo");
        true
    }

    /// Step forward one snapshot; returns whether the cursor moved
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.index += 1;
        self.dirty = true;
        tracing::debug!(index = self.index, "redo");
        true
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Snapshot under the cursor
    pub fn current(&self) -> &Path {
        &self.entries[self.index].snapshot
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Record that the current snapshot has been persisted
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Description of the step `undo` would revert
    pub fn undo_description(&self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        self.entries[self.index].description.as_deref()
    }

    /// Description of the step `redo` would reapply
    pub fn redo_description(&self) -> Option<&str> {
        self.entries
            .get(self.index + 1)
            .and_then(|entry| entry.description.as_deref())
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}
