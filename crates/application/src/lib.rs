//! Courier Application - Core resolution logic, use cases and ports
//!
//! This crate defines the application layer with:
//! - Scope chain resolution (auth, headers and variables by ancestry)
//! - `{{variable}}` and `{path}` substitution
//! - Execution override merging
//! - Request materialization (final URL, headers, body, raw HTTP, curl)
//! - The workspace store and the use cases driving it
//! - Port traits (interfaces for external dependencies)

pub mod console;
pub mod error;
pub mod materialize;
pub mod merge;
pub mod ports;
pub mod scope;
pub mod store;
pub mod use_cases;
pub mod variable_resolver;

pub use console::ConsoleLog;
pub use error::{ApplicationError, ApplicationResult};
pub use materialize::{MaterializedRequest, Materializer, RequestBody, should_run};
pub use merge::{EffectiveRequest, ExecutionDraft, apply_draft, effective_execution, effective_request};
pub use ports::{
    CollectionStore, FileDialog, GitClient, HttpExecutor, HttpExecutorError, MockServerControl,
    ScriptHost,
};
pub use scope::{ResolvedAuth, ResolvedHeader, ScopeNode, resolve_auth, resolve_headers, scope_chain};
pub use store::{Tab, TabKind, WorkspaceStore};
pub use use_cases::{
    CommitCollection, CommitOutcome, LoadCollection, MockServer, SaveCollection, SendOutcome,
    SendRequest,
};
pub use variable_resolver::{ResolutionResult, VariableResolver};
