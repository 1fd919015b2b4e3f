//! JSON helpers.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes a value to stable JSON text.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Deserializes JSON text, pretty-printed or minified.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, SerializationError> {
    serde_json::from_str(json).map_err(SerializationError::Deserialize)
}

/// Deserializes JSON bytes.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(SerializationError::Deserialize)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use courier_domain::{AppSettings, CollectionFile, Environment, HttpMethod, Request};
    use pretty_assertions::assert_eq;

    fn collection_file() -> CollectionFile {
        let request = Request::new("c1", "List users")
            .with_target(HttpMethod::Get, "{{host}}/users")
            .with_header("X-Zeta", "1")
            .with_header("Accept", "application/json");
        CollectionFile {
            id: "c1".to_string(),
            name: "Users".to_string(),
            project_name: "Default".to_string(),
            requests: vec![request],
            folders: Vec::new(),
            executions: Vec::new(),
            environments: vec![Environment::new("dev").with_variable("host", "http://localhost")],
            mock_config: None,
        }
    }

    #[test]
    fn test_output_is_indented_and_newline_terminated() {
        let json = to_json_stable(&AppSettings::default()).unwrap();
        assert!(json.starts_with("{\n  \""));
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn test_header_order_survives_a_save() {
        let json = to_json_stable(&collection_file()).unwrap();
        let zeta = json.find("X-Zeta").unwrap();
        let accept = json.find("Accept").unwrap();
        assert!(zeta < accept);
    }

    #[test]
    fn test_saving_twice_is_byte_identical() {
        let first = to_json_stable(&collection_file()).unwrap();
        let reloaded: CollectionFile = from_json(&first).unwrap();
        let second = to_json_stable(&reloaded).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_minified_input_is_accepted() {
        let file: CollectionFile =
            from_json_bytes(br#"{"id":"c1","name":"Users","requests":[],"folders":[]}"#).unwrap();
        assert_eq!(file.name, "Users");
        assert!(file.requests.is_empty());
    }

    #[test]
    fn test_invalid_json_is_a_deserialize_error() {
        let result: Result<CollectionFile, _> = from_json("{\"id\": }");
        assert!(matches!(result, Err(SerializationError::Deserialize(_))));
    }
}
