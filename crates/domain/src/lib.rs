//! Courier Domain - Core business types
//!
//! This crate defines the data model of the Courier HTTP client: collections,
//! folders, requests, executions, environments and the values that flow
//! between them. All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod collection;
pub mod console;
pub mod environment;
pub mod error;
pub mod id;
pub mod mock;
pub mod overrides;
pub mod request;
pub mod response;
pub mod scripting;
pub mod settings;
pub mod snapshot;
pub mod state;

pub use auth::{AuthConfig, BasicCredentials, BearerToken};
pub use collection::{Collection, CollectionFile, DEFAULT_PROJECT_NAME, Execution, Folder, Request};
pub use console::{LogEntry, LogLevel};
pub use environment::{
    EnvVariable, Environment, FolderScope, GLOBAL_ENVIRONMENT, ResolutionContext,
    ResolvedVariable, VariableScope,
};
pub use error::{DomainError, DomainResult};
pub use id::{Id, generate_id};
pub use mock::{DEFAULT_MOCK_PORT, MockConfig, MockResponse, MockRoute, MockServerConfig, mock_path};
pub use overrides::Override;
pub use request::{
    BodyType, FormDataEntry, FormEntryType, FormField, HttpMethod, HttpRequestArgs, KeyValue,
    entries_from_map,
};
pub use response::ResponseData;
pub use scripting::ScriptItem;
pub use settings::{AppSettings, RedirectPolicy};
pub use snapshot::Snapshot;
pub use state::ExecutionState;
