use thiserror::Error;

/// Structural violations found by [`crate::Path::validate`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Path has no root column")]
    MissingRoot,

    #[error("Path has {0} root columns, expected exactly one")]
    MultipleRoots(usize),

    #[error("Duplicate column id: {0}")]
    DuplicateColumn(String),

    #[error("Duplicate item id: {0}")]
    DuplicateItem(String),

    #[error("Item {item_id} is claimed by more than one column ({first}, {second})")]
    SharedParentItem {
        item_id: String,
        first: String,
        second: String,
    },
}
