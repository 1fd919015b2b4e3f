//! File-backed persistence adapters.

mod collection_store;
mod settings_repository;

pub use collection_store::JsonCollectionStore;
pub use settings_repository::{SettingsError, SettingsRepository, apply_env_overrides};
