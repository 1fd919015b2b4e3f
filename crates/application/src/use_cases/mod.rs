//! Application use cases (business logic orchestration).

mod commit_collection;
mod load_collection;
mod mock_server;
mod save_collection;
mod send;

pub use commit_collection::*;
pub use load_collection::*;
pub use mock_server::*;
pub use save_collection::*;
pub use send::*;

#[cfg(test)]
mod tests;
