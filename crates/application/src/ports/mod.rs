//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod collection_store;
mod file_dialog;
mod git_client;
mod http_executor;
mod mock_server;
mod script_host;

pub use collection_store::{CollectionStore, StoreError};
pub use file_dialog::FileDialog;
pub use git_client::{GitClient, GitError, GitStatus};
pub use http_executor::{HttpExecutor, HttpExecutorError};
pub use mock_server::{MockServerControl, MockServerError};
pub use script_host::{EnvironmentWrite, ScriptContext, ScriptError, ScriptHost, ScriptOutcome, ScriptPhase};
