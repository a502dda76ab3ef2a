//! # Learnpath Editor
//!
//! Editing engine for learning path documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Path / Column / Item / Section       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor                                      │
//! │  - Mutations: snapshot → snapshot           │
//! │  - History: linear undo/redo of snapshots   │
//! │  - Navigator: visible column chain          │
//! │  - Session: history + selection + store     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ store: list / get / create / update / ...   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use learnpath_editor::{EditSession, Mutation};
//!
//! let mut session = EditSession::open(&store, owner, &path_id).await?;
//!
//! session.apply(&Mutation::AddItem { column_id: root_id.clone() });
//! session.undo();
//!
//! session.save().await?;
//! ```

mod errors;
mod history;
mod mutations;
pub mod navigator;
mod session;

pub use errors::EditorError;
pub use history::{History, HistoryEntry};
pub use mutations::{
    delete_subtree, subtree_column_ids, ColumnPatch, Mutation, MutationError, MutationOutcome,
    DEFAULT_BRANCH_ITEM_TITLE, DEFAULT_ITEM_TITLE,
};
pub use navigator::{can_add_column, last_active_item_id, visible_columns, Selection};
pub use session::EditSession;

// Re-export model types for convenience
pub use learnpath_model::{
    Column, ColumnType, IdGenerator, Item, Path, Section, SectionContent, SectionType,
};
