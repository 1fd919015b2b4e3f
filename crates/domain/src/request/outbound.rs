//! The wire-ready request handed to the HTTP executor.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::FormEntryType;

/// One multipart entry, with file entries carrying a path in `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDataEntry {
    /// Field name
    pub key: String,
    /// Text value, or the file path for file entries
    pub value: String,
    /// Whether `value` is text or a file path
    pub entry_type: FormEntryType,
}

/// Arguments of a single HTTP execution.
///
/// When `form_data` is set the executor builds a multipart body (and its
/// boundary) itself and `body` is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequestArgs {
    /// Uppercase method name
    pub method: String,
    /// Fully substituted URL including the query string
    pub url: String,
    /// Final headers, in send order
    pub headers: IndexMap<String, String>,
    /// Serialized body, if any
    #[serde(default)]
    pub body: Option<String>,
    /// Multipart entries, if any
    #[serde(default)]
    pub form_data: Option<Vec<FormDataEntry>>,
}
