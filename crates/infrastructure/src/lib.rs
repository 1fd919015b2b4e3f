//! Courier Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus the settings repository and the
//! cURL importer used by the front end.

pub mod http;
pub mod import;
pub mod mock;
pub mod persistence;
pub mod serialization;

pub use http::{ReqwestHttpExecutor, build_form};
pub use import::{CurlImportError, ParsedCurl, parse_curl};
pub use mock::{AxumMockServer, router};
pub use persistence::{JsonCollectionStore, SettingsError, SettingsRepository, apply_env_overrides};
pub use serialization::{SerializationError, from_json, from_json_bytes, to_json_stable};
