//! Collections and the items that live in them
//!
//! A collection is a flat set of folders, requests and executions. The tree
//! is expressed through `parent_id` pointers (folders and requests) and
//! `request_id` pointers (executions).

mod execution;
mod file;
mod folder;
mod request;

pub use execution::Execution;
pub use file::{Collection, CollectionFile, DEFAULT_PROJECT_NAME};
pub use folder::Folder;
pub use request::Request;
