//! # Path Mutations
//!
//! Semantic editing operations on a [`Path`] document.
//!
//! ## Design Principles
//!
//! 1. **Validated first**: every mutation is checked against the snapshot
//!    before it touches anything, so a refused mutation leaves no trace
//! 2. **Stale ids are harmless**: an id missing from the snapshot is a
//!    no-op, never an error surfaced to the caller
//! 3. **Compound steps are atomic**: title sync and subtree deletion happen
//!    inside the one mutation that triggers them
//!
//! ## Mutation Semantics
//!
//! ### Titles
//! - Renaming an item renames the column it opens
//! - Renaming a column that has an owning item renames that item
//!
//! ### Delete
//! - Deleting an item removes the column it opens and every column below
//! - The root column cannot be deleted

use std::collections::{HashSet, VecDeque};

use learnpath_model::{
    Column, ColumnType, IdGenerator, Item, Path, Section, SectionContent, SectionType,
    MIN_COLUMN_WIDTH,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_ITEM_TITLE: &str = "New Topic";
pub const DEFAULT_BRANCH_ITEM_TITLE: &str = "New Content";

/// Fields of a column that can be edited directly
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

impl ColumnPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn width(width: f64) -> Self {
        Self {
            width: Some(width),
            ..Self::default()
        }
    }
}

/// Semantic mutations (one undo step each)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    /// Rename the path itself
    RenamePath { title: String },

    /// Merge fields into a column (title syncs to the owning item)
    UpdateColumn { column_id: String, patch: ColumnPatch },

    /// Set a column's display width, clamped to the minimum
    ResizeColumn { column_id: String, width: f64 },

    /// Append an item with a default title
    AddItem { column_id: String },

    /// Retitle an item (syncs to the column it opens)
    UpdateItem {
        column_id: String,
        item_id: String,
        title: String,
    },

    /// Remove an item and the subtree of columns it opens
    DeleteItem { column_id: String, item_id: String },

    /// Append a section with type-specific placeholder content
    AddSection {
        column_id: String,
        section_type: SectionType,
    },

    /// Replace a section's content wholesale
    UpdateSectionContent {
        column_id: String,
        section_id: String,
        content: SectionContent,
    },

    DeleteSection { column_id: String, section_id: String },

    /// Reorder the non-floating sections of a column
    UpdateSectionsOrder { column_id: String, order: Vec<String> },

    /// Open a new column under an item
    AddColumn {
        parent_item_id: String,
        column_type: ColumnType,
    },

    /// Add an item to a DYNAMIC column together with the DYNAMIC column it opens
    AddBranchFromDynamicColumn { column_id: String },

    /// Remove a non-root column and everything below it
    DeleteColumn { column_id: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Item {item_id} not found in column {column_id}")]
    ItemNotFound { column_id: String, item_id: String },

    #[error("Section {section_id} not found in column {column_id}")]
    SectionNotFound {
        column_id: String,
        section_id: String,
    },

    #[error("Root column cannot be deleted")]
    RootColumn,

    #[error("Column {0} is not a DYNAMIC column")]
    NotDynamic(String),

    #[error("Item {item_id} already opens column {column_id}")]
    ItemAlreadyOwnsColumn { item_id: String, column_id: String },

    #[error("Section {section_id} holds {expected:?} content, got {actual:?}")]
    ContentTypeMismatch {
        section_id: String,
        expected: SectionType,
        actual: SectionType,
    },
}

impl MutationError {
    /// Missing ids mean the caller's view is stale; these become no-ops
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            MutationError::ColumnNotFound(_)
                | MutationError::ItemNotFound { .. }
                | MutationError::SectionNotFound { .. }
        )
    }
}

/// What a mutation did to the document
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    /// Document changed
    Applied,
    /// Referenced id was absent; document untouched
    Noop(MutationError),
    /// Operation is not legal on this document; document untouched
    Rejected(MutationError),
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied)
    }

    pub fn error(&self) -> Option<&MutationError> {
        match self {
            MutationOutcome::Applied => None,
            MutationOutcome::Noop(e) | MutationOutcome::Rejected(e) => Some(e),
        }
    }
}

impl From<MutationError> for MutationOutcome {
    fn from(e: MutationError) -> Self {
        if e.is_not_found() {
            MutationOutcome::Noop(e)
        } else {
            MutationOutcome::Rejected(e)
        }
    }
}

impl Mutation {
    /// Short label used for history entries and logs
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::RenamePath { .. } => "rename path",
            Mutation::UpdateColumn { .. } => "update column",
            Mutation::ResizeColumn { .. } => "resize column",
            Mutation::AddItem { .. } => "add item",
            Mutation::UpdateItem { .. } => "update item",
            Mutation::DeleteItem { .. } => "delete item",
            Mutation::AddSection { .. } => "add section",
            Mutation::UpdateSectionContent { .. } => "update section",
            Mutation::DeleteSection { .. } => "delete section",
            Mutation::UpdateSectionsOrder { .. } => "reorder sections",
            Mutation::AddColumn { .. } => "add column",
            Mutation::AddBranchFromDynamicColumn { .. } => "add branch",
            Mutation::DeleteColumn { .. } => "delete column",
        }
    }

    /// Apply to a copy of `path`, leaving the source untouched
    pub fn applied_to(&self, path: &Path, ids: &mut IdGenerator) -> (Path, MutationOutcome) {
        let mut draft = path.clone();
        let outcome = self.apply(&mut draft, ids);
        (draft, outcome)
    }

    /// Apply in place. The document is only modified when the outcome is
    /// [`MutationOutcome::Applied`].
    pub fn apply(&self, path: &mut Path, ids: &mut IdGenerator) -> MutationOutcome {
        if let Err(e) = self.validate(path) {
            return e.into();
        }

        match self {
            Mutation::RenamePath { title } => {
                path.title = title.clone();
            }

            Mutation::UpdateColumn { column_id, patch } => {
                Self::apply_update_column(path, column_id, patch);
            }

            Mutation::ResizeColumn { column_id, width } => {
                if let Some(col) = path.column_mut(column_id) {
                    col.width = clamp_width(*width);
                }
            }

            Mutation::AddItem { column_id } => {
                let item = Item::new(ids.new_id(), DEFAULT_ITEM_TITLE);
                if let Some(col) = path.column_mut(column_id) {
                    col.items.push(item);
                }
            }

            Mutation::UpdateItem {
                column_id,
                item_id,
                title,
            } => {
                if let Some(item) = path
                    .column_mut(column_id)
                    .and_then(|col| col.item_mut(item_id))
                {
                    item.title = title.clone();
                }
                if let Some(child) = path.child_column_mut(item_id) {
                    child.title = title.clone();
                }
            }

            Mutation::DeleteItem { column_id, item_id } => {
                if let Some(col) = path.column_mut(column_id) {
                    col.items.retain(|i| &i.id != item_id);
                }
                let child_id = path.child_column(item_id).map(|c| c.id.clone());
                if let Some(child_id) = child_id {
                    delete_subtree(path, &child_id);
                }
            }

            Mutation::AddSection {
                column_id,
                section_type,
            } => {
                let section = Section::new(ids.new_id(), SectionContent::default_for(*section_type));
                if let Some(col) = path.column_mut(column_id) {
                    col.sections.push(section);
                }
            }

            Mutation::UpdateSectionContent {
                column_id,
                section_id,
                content,
            } => {
                if let Some(section) = path
                    .column_mut(column_id)
                    .and_then(|col| col.section_mut(section_id))
                {
                    section.content = content.clone();
                }
            }

            Mutation::DeleteSection {
                column_id,
                section_id,
            } => {
                if let Some(col) = path.column_mut(column_id) {
                    col.sections.retain(|s| &s.id != section_id);
                }
            }

            Mutation::UpdateSectionsOrder { column_id, order } => {
                if let Some(col) = path.column_mut(column_id) {
                    reorder_sections(col, order);
                }
            }

            Mutation::AddColumn {
                parent_item_id,
                column_type,
            } => {
                let title = path
                    .item(parent_item_id)
                    .map(|i| i.title.clone())
                    .unwrap_or_else(|| column_type.fallback_title().to_string());
                path.columns.push(Column::new(
                    ids.new_id(),
                    title,
                    *column_type,
                    Some(parent_item_id.clone()),
                ));
            }

            Mutation::AddBranchFromDynamicColumn { column_id } => {
                let item = Item::new(ids.new_id(), DEFAULT_BRANCH_ITEM_TITLE);
                let child = Column::new(
                    ids.new_id(),
                    item.title.clone(),
                    ColumnType::Dynamic,
                    Some(item.id.clone()),
                );
                if let Some(col) = path.column_mut(column_id) {
                    col.items.push(item);
                    path.columns.push(child);
                }
            }

            Mutation::DeleteColumn { column_id } => {
                delete_subtree(path, column_id);
            }
        }

        MutationOutcome::Applied
    }

    fn apply_update_column(path: &mut Path, column_id: &str, patch: &ColumnPatch) {
        let Some(col) = path.column_mut(column_id) else {
            return;
        };

        if let Some(width) = patch.width {
            col.width = clamp_width(width);
        }

        let Some(title) = &patch.title else {
            return;
        };
        col.title = title.clone();

        // Column → owning item, done here so the pair changes in one step
        if let Some(parent_item_id) = col.parent_item_id.clone() {
            if let Some(item) = path.item_mut(&parent_item_id) {
                item.title = title.clone();
            }
        }
    }

    /// Validate without applying
    pub fn validate(&self, path: &Path) -> Result<(), MutationError> {
        match self {
            Mutation::RenamePath { .. } => Ok(()),

            Mutation::UpdateColumn { column_id, .. }
            | Mutation::ResizeColumn { column_id, .. }
            | Mutation::AddItem { column_id }
            | Mutation::UpdateSectionsOrder { column_id, .. } => {
                find_column(path, column_id).map(|_| ())
            }

            Mutation::UpdateItem {
                column_id, item_id, ..
            }
            | Mutation::DeleteItem { column_id, item_id } => {
                let col = find_column(path, column_id)?;
                if col.has_item(item_id) {
                    Ok(())
                } else {
                    Err(MutationError::ItemNotFound {
                        column_id: column_id.clone(),
                        item_id: item_id.clone(),
                    })
                }
            }

            Mutation::AddSection { column_id, .. }
            | Mutation::AddBranchFromDynamicColumn { column_id } => {
                let col = find_column(path, column_id)?;
                match col.column_type {
                    ColumnType::Dynamic => Ok(()),
                    ColumnType::Branch => Err(MutationError::NotDynamic(column_id.clone())),
                }
            }

            Mutation::UpdateSectionContent {
                column_id,
                section_id,
                content,
            } => {
                let section = find_section(path, column_id, section_id)?;
                if section.section_type() == content.section_type() {
                    Ok(())
                } else {
                    Err(MutationError::ContentTypeMismatch {
                        section_id: section_id.clone(),
                        expected: section.section_type(),
                        actual: content.section_type(),
                    })
                }
            }

            Mutation::DeleteSection {
                column_id,
                section_id,
            } => find_section(path, column_id, section_id).map(|_| ()),

            Mutation::AddColumn { parent_item_id, .. } => match path.child_column(parent_item_id) {
                Some(existing) => Err(MutationError::ItemAlreadyOwnsColumn {
                    item_id: parent_item_id.clone(),
                    column_id: existing.id.clone(),
                }),
                None => Ok(()),
            },

            Mutation::DeleteColumn { column_id } => {
                let col = find_column(path, column_id)?;
                if col.is_root() {
                    Err(MutationError::RootColumn)
                } else {
                    Ok(())
                }
            }
        }
    }
}

fn find_column<'a>(path: &'a Path, column_id: &str) -> Result<&'a Column, MutationError> {
    path.column(column_id)
        .ok_or_else(|| MutationError::ColumnNotFound(column_id.to_string()))
}

fn find_section<'a>(
    path: &'a Path,
    column_id: &str,
    section_id: &str,
) -> Result<&'a Section, MutationError> {
    find_column(path, column_id)?
        .section(section_id)
        .ok_or_else(|| MutationError::SectionNotFound {
            column_id: column_id.to_string(),
            section_id: section_id.to_string(),
        })
}

fn clamp_width(width: f64) -> f64 {
    width.max(MIN_COLUMN_WIDTH)
}

/// Put the non-floating sections in `order`, then re-append floating ones.
///
/// Unknown ids are ignored. Non-floating sections the caller left out keep
/// their relative order after the listed ones.
fn reorder_sections(col: &mut Column, order: &[String]) {
    let (floating, mut linear): (Vec<Section>, Vec<Section>) =
        std::mem::take(&mut col.sections)
            .into_iter()
            .partition(|s| s.is_floating());

    let mut sections = Vec::with_capacity(linear.len() + floating.len());
    for id in order {
        if let Some(pos) = linear.iter().position(|s| &s.id == id) {
            sections.push(linear.remove(pos));
        }
    }
    sections.extend(linear);
    sections.extend(floating);

    col.sections = sections;
}

/// Ids of `start_column_id` and every column below it, breadth-first.
///
/// Each column is visited at most once, so two items claiming the same
/// child (or a parent cycle in malformed data) cannot loop.
pub fn subtree_column_ids(path: &Path, start_column_id: &str) -> Vec<String> {
    let mut queue = VecDeque::from([start_column_id.to_string()]);
    let mut visited: HashSet<String> = HashSet::new();
    let mut subtree = Vec::new();

    while let Some(column_id) = queue.pop_front() {
        if !visited.insert(column_id.clone()) {
            continue;
        }
        subtree.push(column_id.clone());

        let Some(col) = path.column(&column_id) else {
            continue;
        };
        let item_ids: HashSet<&str> = col.items.iter().map(|i| i.id.as_str()).collect();
        if item_ids.is_empty() {
            continue;
        }

        for child in &path.columns {
            let Some(parent_item_id) = child.parent_item_id.as_deref() else {
                continue;
            };
            if item_ids.contains(parent_item_id) && !visited.contains(&child.id) {
                queue.push_back(child.id.clone());
            }
        }
    }

    subtree
}

/// Remove a column and all its descendants; returns the removed ids
pub fn delete_subtree(path: &mut Path, start_column_id: &str) -> Vec<String> {
    let doomed = subtree_column_ids(path, start_column_id);
    let doomed_set: HashSet<&str> = doomed.iter().map(String::as_str).collect();
    path.columns.retain(|c| !doomed_set.contains(c.id.as_str()));
    doomed
}
