//! Flattened key/value entries for headers and query parameters

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single key/value row that can be toggled without deleting it.
///
/// Headers and query parameters of an execution are lists of these rather
/// than maps, so repeated keys (`?tag=a&tag=b`) keep one row each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    /// The key (header name or parameter name)
    pub key: String,
    /// The value, may contain `{{variables}}`
    pub value: String,
    /// Whether this row is sent
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl KeyValue {
    /// Creates an enabled entry.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }

    /// Creates a disabled entry.
    #[must_use]
    pub fn disabled(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: false,
        }
    }
}

/// Flattens an ordered map into enabled entries, keeping map order.
#[must_use]
pub fn entries_from_map(map: &IndexMap<String, String>) -> Vec<KeyValue> {
    map.iter().map(|(k, v)| KeyValue::new(k, v)).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_enabled_defaults_to_true() {
        let kv: KeyValue = serde_json::from_str(r#"{"key":"page","value":"1"}"#).unwrap();
        assert!(kv.enabled);
    }

    #[test]
    fn test_entries_from_map_keeps_order() {
        let mut map = IndexMap::new();
        map.insert("Zeta".to_string(), "1".to_string());
        map.insert("Alpha".to_string(), "2".to_string());

        let entries = entries_from_map(&map);
        assert_eq!(
            entries,
            vec![KeyValue::new("Zeta", "1"), KeyValue::new("Alpha", "2")]
        );
    }
}
