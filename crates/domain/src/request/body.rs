//! Request body types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// The declared kind of a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BodyType {
    /// No body is sent
    #[default]
    None,
    /// JSON text
    Json,
    /// XML text
    Xml,
    /// HTML text
    Html,
    /// Plain text
    Text,
    /// JavaScript source
    Javascript,
    /// YAML text
    Yaml,
    /// `application/x-www-form-urlencoded` fields
    FormUrlencoded,
    /// `multipart/form-data` entries
    Multipart,
}

impl BodyType {
    /// Guesses the type of a body that was saved without one.
    ///
    /// Text that looks like a JSON object or array is JSON, anything else
    /// is treated as no body at all.
    #[must_use]
    pub fn detect(body: &str) -> Self {
        let trimmed = body.trim_start();
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            Self::Json
        } else {
            Self::None
        }
    }

    /// Returns the `Content-Type` implied by this body type.
    ///
    /// `Multipart` has none: its boundary is chosen by the HTTP executor.
    #[must_use]
    pub const fn content_type(self) -> Option<&'static str> {
        match self {
            Self::None | Self::Multipart => None,
            Self::Json => Some("application/json"),
            Self::Xml => Some("application/xml"),
            Self::Html => Some("text/html"),
            Self::Text => Some("text/plain"),
            Self::Javascript => Some("application/javascript"),
            Self::Yaml => Some("application/x-yaml"),
            Self::FormUrlencoded => Some("application/x-www-form-urlencoded"),
        }
    }

    /// Returns true if the body is built from form fields instead of raw text.
    #[must_use]
    pub const fn is_form(self) -> bool {
        matches!(self, Self::FormUrlencoded | Self::Multipart)
    }

    /// Returns the name used in files and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Html => "html",
            Self::Text => "text",
            Self::Javascript => "javascript",
            Self::Yaml => "yaml",
            Self::FormUrlencoded => "form_urlencoded",
            Self::Multipart => "multipart",
        }
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyType {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        let wanted = s.trim().to_lowercase();
        [
            Self::None,
            Self::Json,
            Self::Xml,
            Self::Html,
            Self::Text,
            Self::Javascript,
            Self::Yaml,
            Self::FormUrlencoded,
            Self::Multipart,
        ]
        .into_iter()
        .find(|t| t.as_str() == wanted)
        .ok_or(DomainError::UnsupportedBodyType(wanted))
    }
}

/// Whether a form entry is literal text or a file reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormEntryType {
    /// Literal text value
    #[default]
    Text,
    /// Path of a file to upload
    File,
}

/// A form field of a `form_urlencoded` or `multipart` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    /// Field name
    pub key: String,
    /// Value (or file path), may contain `{{variables}}`
    pub value: String,
    /// Text or file
    #[serde(default)]
    pub entry_type: FormEntryType,
    /// Whether the field is sent
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl FormField {
    /// Creates an enabled text field.
    #[must_use]
    pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            entry_type: FormEntryType::Text,
            enabled: true,
        }
    }

    /// Creates an enabled file field.
    #[must_use]
    pub fn file(key: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: path.into(),
            entry_type: FormEntryType::File,
            enabled: true,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_detect() {
        assert_eq!(BodyType::detect(r#"  {"a": 1}"#), BodyType::Json);
        assert_eq!(BodyType::detect("[1, 2]"), BodyType::Json);
        assert_eq!(BodyType::detect("hello"), BodyType::None);
        assert_eq!(BodyType::detect(""), BodyType::None);
    }

    #[test]
    fn test_content_type() {
        assert_eq!(BodyType::Json.content_type(), Some("application/json"));
        assert_eq!(
            BodyType::FormUrlencoded.content_type(),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(BodyType::Multipart.content_type(), None);
        assert_eq!(BodyType::None.content_type(), None);
    }

    #[test]
    fn test_body_type_names_round_trip() {
        assert_eq!(
            "form_urlencoded".parse::<BodyType>().unwrap(),
            BodyType::FormUrlencoded
        );
        assert_eq!(
            serde_json::to_string(&BodyType::FormUrlencoded).unwrap(),
            "\"form_urlencoded\""
        );
        assert!("protobuf".parse::<BodyType>().is_err());
    }

    #[test]
    fn test_form_field_defaults() {
        let field: FormField = serde_json::from_str(r#"{"key":"a","value":"b"}"#).unwrap();
        assert_eq!(field, FormField::text("a", "b"));
    }
}
