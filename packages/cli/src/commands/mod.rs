pub mod create;
pub mod delete;
pub mod edit;
pub mod init;
pub mod list;
pub mod set_major;
pub mod show;

pub use create::{create, CreateArgs};
pub use delete::{delete, DeleteArgs};
pub use edit::{edit, EditArgs};
pub use init::{init, InitArgs};
pub use list::list;
pub use set_major::{set_major, SetMajorArgs};
pub use show::{show, ShowArgs};

use learnpath_store::{JsonFileStore, OwnerId};

/// Store and owner every path command runs against
pub struct Context {
    pub store: JsonFileStore,
    pub owner: OwnerId,
}
