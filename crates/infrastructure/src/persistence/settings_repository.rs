//! User settings persistence.
//!
//! Settings live in the platform config directory:
//! - Linux: ~/.config/courier/settings.json
//! - macOS: ~/Library/Application Support/courier/settings.json
//! - Windows: %APPDATA%/courier/settings.json

use std::path::{Path, PathBuf};

use courier_domain::{AppSettings, RedirectPolicy};
use tokio::fs;

use crate::serialization::{SerializationError, from_json_bytes, to_json_stable};

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// Could not determine config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,

    /// An override variable holds a value of the wrong shape.
    #[error("Invalid value for {key}: {value}")]
    InvalidValue {
        /// Variable name
        key: String,
        /// Rejected value
        value: String,
    },
}

/// Repository for the settings file.
#[derive(Debug, Clone, Default)]
pub struct SettingsRepository {
    path: Option<PathBuf>,
}

impl SettingsRepository {
    /// Creates a repository for the default settings location.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: dirs::config_dir().map(|p| p.join("courier").join("settings.json")),
        }
    }

    /// Creates a repository reading and writing `path`.
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Returns the settings file location, if one could be determined.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Loads settings, falling back to defaults when there is no file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(&self) -> Result<AppSettings, SettingsError> {
        let Some(path) = &self.path else {
            return Ok(AppSettings::default());
        };

        match fs::read(path).await {
            Ok(bytes) => Ok(from_json_bytes(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppSettings::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes settings to disk, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if no location is known or the write fails.
    pub async fn save(&self, settings: &AppSettings) -> Result<(), SettingsError> {
        let path = self.path.as_ref().ok_or(SettingsError::NoConfigDir)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, to_json_stable(settings)?).await?;
        Ok(())
    }
}

/// Applies `COURIER_*` overrides read through `lookup`.
///
/// Recognized variables: `COURIER_ENVIRONMENT`, `COURIER_USER_AGENT`,
/// `COURIER_TIMEOUT_SECS`, `COURIER_REDIRECT_POLICY` (`follow` or `none`),
/// `COURIER_MAX_REDIRECTS` and `COURIER_MOCK_PORT`.
///
/// # Errors
///
/// Returns `SettingsError::InvalidValue` for a value that does not parse.
pub fn apply_env_overrides(
    mut settings: AppSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<AppSettings, SettingsError> {
    if let Some(value) = lookup("COURIER_ENVIRONMENT") {
        settings.default_environment = value;
    }
    if let Some(value) = lookup("COURIER_USER_AGENT") {
        settings.user_agent = value;
    }
    if let Some(value) = lookup("COURIER_TIMEOUT_SECS") {
        settings.timeout_secs = parse("COURIER_TIMEOUT_SECS", &value)?;
    }
    if let Some(value) = lookup("COURIER_REDIRECT_POLICY") {
        settings.redirect_policy = match value.trim().to_lowercase().as_str() {
            "follow" => RedirectPolicy::Follow,
            "none" => RedirectPolicy::None,
            _ => return Err(invalid("COURIER_REDIRECT_POLICY", &value)),
        };
    }
    if let Some(value) = lookup("COURIER_MAX_REDIRECTS") {
        settings.max_redirects = parse("COURIER_MAX_REDIRECTS", &value)?;
    }
    if let Some(value) = lookup("COURIER_MOCK_PORT") {
        settings.default_mock_port = parse("COURIER_MOCK_PORT", &value)?;
    }
    Ok(settings)
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, SettingsError> {
    value.trim().parse().map_err(|_| invalid(key, value))
}

fn invalid(key: &str, value: &str) -> SettingsError {
    SettingsError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
