//! # Learnpath Model
//!
//! Document schema for learning paths.
//!
//! ## Structure
//!
//! ```text
//! Path
//!  └─ columns (flat, keyed by id)
//!      ├─ Column { parent_item_id: None }        ← root, exactly one
//!      │    └─ items: [Item a, Item b]
//!      ├─ Column { parent_item_id: Some(a) }     ← owned by Item a
//!      │    └─ sections: [Section, ...]
//!      └─ Column { parent_item_id: Some(b) }     ← owned by Item b
//! ```
//!
//! Columns are stored flat. The item → child column relation is an id field
//! on the child and is recomputed by lookup on every query; nothing caches
//! a live reference to another column.

pub mod error;
pub mod id_generator;
pub mod path;
pub mod section;

pub use error::ModelError;
pub use id_generator::IdGenerator;
pub use path::{
    Column, ColumnType, Item, Path, DEFAULT_COLUMN_WIDTH, DEFAULT_ROOT_TITLE, MIN_COLUMN_WIDTH,
};
pub use section::{Section, SectionContent, SectionType};
