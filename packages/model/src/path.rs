//! # Path Document
//!
//! A Path owns a flat collection of columns. Relations are id fields:
//! a column points at the item that owns it through `parent_item_id`, and
//! every "which column does this item open" question is answered by
//! scanning the collection.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{IdGenerator, ModelError, Section};

pub const DEFAULT_COLUMN_WIDTH: f64 = 320.0;
pub const MIN_COLUMN_WIDTH: f64 = 120.0;
pub const DEFAULT_ROOT_TITLE: &str = "Phase";

fn default_column_width() -> f64 {
    DEFAULT_COLUMN_WIDTH
}

/// Whether a column lists navigable items or holds content blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnType {
    Branch,
    Dynamic,
}

impl ColumnType {
    /// Title used for a new column whose owning item cannot be found
    pub fn fallback_title(self) -> &'static str {
        match self {
            ColumnType::Branch => "New Phase",
            ColumnType::Dynamic => "New Content",
        }
    }
}

/// Navigable entry of a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub title: String,
}

impl Item {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: String,
    pub title: String,

    #[serde(rename = "type")]
    pub column_type: ColumnType,

    /// Item (in another column) that opens this column; `None` only for the root
    pub parent_item_id: Option<String>,

    /// Display hint in pixels
    #[serde(default = "default_column_width")]
    pub width: f64,

    #[serde(default)]
    pub items: Vec<Item>,

    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Column {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        column_type: ColumnType,
        parent_item_id: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            column_type,
            parent_item_id,
            width: DEFAULT_COLUMN_WIDTH,
            items: Vec::new(),
            sections: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_item_id.is_none()
    }

    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub fn item_mut(&mut self, item_id: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id == item_id)
    }

    pub fn has_item(&self, item_id: &str) -> bool {
        self.item(item_id).is_some()
    }

    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    pub fn section_mut(&mut self, section_id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == section_id)
    }
}

/// A learning path document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub is_major: bool,

    pub columns: Vec<Column>,
}

impl Path {
    /// Create a path seeded with a single empty root BRANCH column
    pub fn new(title: impl Into<String>, ids: &mut IdGenerator) -> Self {
        let root = Column::new(ids.new_id(), DEFAULT_ROOT_TITLE, ColumnType::Branch, None);

        Self {
            id: ids.new_id(),
            title: title.into(),
            created_at: Utc::now(),
            is_major: false,
            columns: vec![root],
        }
    }

    pub fn root_column(&self) -> Option<&Column> {
        self.columns.iter().find(|c| c.is_root())
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn column_mut(&mut self, column_id: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == column_id)
    }

    /// Column opened by `item_id`, if any
    pub fn child_column(&self, item_id: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.parent_item_id.as_deref() == Some(item_id))
    }

    pub fn child_column_mut(&mut self, item_id: &str) -> Option<&mut Column> {
        self.columns
            .iter_mut()
            .find(|c| c.parent_item_id.as_deref() == Some(item_id))
    }

    pub fn has_child_column(&self, item_id: &str) -> bool {
        self.child_column(item_id).is_some()
    }

    /// Column whose `items` contain `item_id`
    pub fn owner_column(&self, item_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.has_item(item_id))
    }

    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.columns.iter().find_map(|c| c.item(item_id))
    }

    pub fn item_mut(&mut self, item_id: &str) -> Option<&mut Item> {
        self.columns.iter_mut().find_map(|c| c.item_mut(item_id))
    }

    /// Item id → id of the column it opens, rebuilt from the current columns
    pub fn child_index(&self) -> HashMap<&str, &str> {
        self.columns
            .iter()
            .filter_map(|c| c.parent_item_id.as_deref().map(|item| (item, c.id.as_str())))
            .collect()
    }

    /// Columns whose owning item no longer exists anywhere in the path
    pub fn orphan_columns(&self) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|c| match c.parent_item_id.as_deref() {
                Some(item_id) => self.item(item_id).is_none(),
                None => false,
            })
            .collect()
    }

    /// Check the structural invariants that every stored path must hold
    pub fn validate(&self) -> Result<(), ModelError> {
        let roots = self.columns.iter().filter(|c| c.is_root()).count();
        match roots {
            0 => return Err(ModelError::MissingRoot),
            1 => {}
            n => return Err(ModelError::MultipleRoots(n)),
        }

        let mut column_ids = HashSet::new();
        let mut item_ids = HashSet::new();
        let mut claimed: HashMap<&str, &str> = HashMap::new();

        for column in &self.columns {
            if !column_ids.insert(column.id.as_str()) {
                return Err(ModelError::DuplicateColumn(column.id.clone()));
            }

            for item in &column.items {
                if !item_ids.insert(item.id.as_str()) {
                    return Err(ModelError::DuplicateItem(item.id.clone()));
                }
            }

            if let Some(item_id) = column.parent_item_id.as_deref() {
                if let Some(first) = claimed.insert(item_id, column.id.as_str()) {
                    return Err(ModelError::SharedParentItem {
                        item_id: item_id.to_string(),
                        first: first.to_string(),
                        second: column.id.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Path {
        let mut ids = IdGenerator::sequential("t");
        let mut path = Path::new("Math", &mut ids);
        let root_id = path.columns[0].id.clone();

        let root = path.column_mut(&root_id).unwrap();
        root.items.push(Item::new("algebra", "Algebra"));
        root.items.push(Item::new("geometry", "Geometry"));

        path.columns.push(Column::new(
            "algebra-col",
            "Algebra",
            ColumnType::Dynamic,
            Some("algebra".to_string()),
        ));
        path
    }

    #[test]
    fn test_new_path_has_single_root_branch() {
        let mut ids = IdGenerator::sequential("t");
        let path = Path::new("Math", &mut ids);

        assert_eq!(path.title, "Math");
        assert!(!path.is_major);
        assert_eq!(path.columns.len(), 1);

        let root = path.root_column().unwrap();
        assert_eq!(root.column_type, ColumnType::Branch);
        assert_eq!(root.title, DEFAULT_ROOT_TITLE);
        assert!(root.items.is_empty());
        assert_eq!(root.width, DEFAULT_COLUMN_WIDTH);
        assert!(path.validate().is_ok());
    }

    #[test]
    fn test_child_lookup() {
        let path = sample();

        assert_eq!(path.child_column("algebra").unwrap().id, "algebra-col");
        assert!(path.child_column("geometry").is_none());
        assert_eq!(path.owner_column("geometry").unwrap().id, "t-1");

        let index = path.child_index();
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("algebra"), Some(&"algebra-col"));
    }

    #[test]
    fn test_validate_rejects_shared_parent_item() {
        let mut path = sample();
        path.columns.push(Column::new(
            "algebra-col-2",
            "Algebra",
            ColumnType::Branch,
            Some("algebra".to_string()),
        ));

        assert_eq!(
            path.validate(),
            Err(ModelError::SharedParentItem {
                item_id: "algebra".to_string(),
                first: "algebra-col".to_string(),
                second: "algebra-col-2".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_root_count() {
        let mut path = sample();
        path.columns.retain(|c| !c.is_root());
        assert_eq!(path.validate(), Err(ModelError::MissingRoot));

        let mut path = sample();
        path.columns
            .push(Column::new("second-root", "Again", ColumnType::Branch, None));
        assert_eq!(path.validate(), Err(ModelError::MultipleRoots(2)));
    }

    #[test]
    fn test_orphan_columns() {
        let mut path = sample();
        assert!(path.orphan_columns().is_empty());

        path.columns[0].items.retain(|i| i.id != "algebra");
        let orphans: Vec<_> = path.orphan_columns().iter().map(|c| c.id.clone()).collect();
        assert_eq!(orphans, vec!["algebra-col".to_string()]);
    }

    #[test]
    fn test_json_layout() {
        let path = sample();
        let value = serde_json::to_value(&path).unwrap();

        assert!(value.get("createdAt").is_some());
        assert_eq!(value["isMajor"], false);
        assert_eq!(value["columns"][0]["type"], "BRANCH");
        assert_eq!(value["columns"][0]["parentItemId"], serde_json::Value::Null);
        assert_eq!(value["columns"][1]["parentItemId"], "algebra");
        assert_eq!(value["columns"][1]["type"], "DYNAMIC");

        let back: Path = serde_json::from_value(value).unwrap();
        assert_eq!(back, path);
    }
}
