//! # Tree Navigator
//!
//! Derives the visible column chain from a document and the per-column
//! active selection. Everything here is a pure function of its inputs and
//! is recomputed after every state change.

use std::collections::{HashMap, HashSet};

use learnpath_model::{Column, Path};
use serde::{Deserialize, Serialize};

/// Active item per column (`Column.id → Item.id`)
///
/// A column with no entry and a column mapped to `None` both mean
/// "nothing selected".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    active: HashMap<String, Option<String>>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_item(&self, column_id: &str) -> Option<&str> {
        self.active.get(column_id).and_then(|item| item.as_deref())
    }

    /// Set an entry directly, without tracing or toggling
    pub fn set(&mut self, column_id: impl Into<String>, item_id: Option<String>) {
        self.active.insert(column_id.into(), item_id);
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.active.values().all(Option::is_none)
    }

    /// Click on `item_id` inside `column_id`.
    ///
    /// Selections held by the clicked column's ancestors survive, every other
    /// column's selection is dropped, and clicking the already-active item
    /// deselects it.
    pub fn select(&mut self, path: &Path, column_id: &str, item_id: &str) {
        let Some(column) = path.column(column_id) else {
            return;
        };

        let mut next = HashMap::new();
        for ancestor in ancestor_chain(path, column) {
            if ancestor.id == column_id {
                continue;
            }
            if let Some(Some(active)) = self.active.get(&ancestor.id) {
                next.insert(ancestor.id.clone(), Some(active.clone()));
            }
        }

        let toggled = if self.active_item(column_id) == Some(item_id) {
            None
        } else {
            Some(item_id.to_string())
        };
        next.insert(column_id.to_string(), toggled);

        self.active = next;
    }

    /// Single-pane back navigation from `column_id` to its parent column
    pub fn step_back(&mut self, path: &Path, column_id: &str) {
        let parent = path
            .column(column_id)
            .and_then(|c| c.parent_item_id.as_deref())
            .and_then(|item_id| path.owner_column(item_id));

        if let Some(parent) = parent {
            self.active.remove(&parent.id);
        }
    }

    /// Drop entries that point at columns or items no longer in `path`
    pub fn prune(&mut self, path: &Path) {
        self.active.retain(|column_id, item_id| {
            let Some(column) = path.column(column_id) else {
                return false;
            };
            match item_id {
                Some(item_id) => column.has_item(item_id),
                None => true,
            }
        });
    }
}

/// Columns from the root down to `column`, following owning items upward
fn ancestor_chain<'a>(path: &'a Path, column: &'a Column) -> Vec<&'a Column> {
    let mut chain = vec![column];
    let mut seen = HashSet::from([column.id.as_str()]);
    let mut current = column;

    while let Some(parent_item_id) = current.parent_item_id.as_deref() {
        let Some(parent) = path.owner_column(parent_item_id) else {
            break;
        };
        if !seen.insert(parent.id.as_str()) {
            break;
        }
        chain.push(parent);
        current = parent;
    }

    chain.reverse();
    chain
}

/// Active item of `column`, ignoring entries for items that no longer exist
fn live_selection<'a>(column: &Column, selection: &'a Selection) -> Option<&'a str> {
    selection
        .active_item(&column.id)
        .filter(|item_id| column.has_item(item_id))
}

/// The chain of columns on screen: root first, then the column opened by
/// each active item in turn.
pub fn visible_columns<'a>(path: &'a Path, selection: &Selection) -> Vec<&'a Column> {
    let Some(root) = path.root_column() else {
        return Vec::new();
    };

    let mut chain = vec![root];
    let mut seen = HashSet::from([root.id.as_str()]);
    let mut current = root;

    while let Some(item_id) = live_selection(current, selection) {
        let Some(child) = path.child_column(item_id) else {
            break;
        };
        if !seen.insert(child.id.as_str()) {
            break;
        }
        chain.push(child);
        current = child;
    }

    chain
}

/// Active item of the deepest column in the visible chain that has one
pub fn last_active_item_id<'a>(path: &Path, selection: &'a Selection) -> Option<&'a str> {
    visible_columns(path, selection)
        .into_iter()
        .filter_map(|col| live_selection(col, selection))
        .last()
}

/// Whether "add column" is legal: the last active item exists and does not
/// already open a column.
pub fn can_add_column(path: &Path, selection: &Selection) -> bool {
    match last_active_item_id(path, selection) {
        Some(item_id) => path.item(item_id).is_some() && !path.has_child_column(item_id),
        None => false,
    }
}
