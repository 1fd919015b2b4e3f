//! ID generation utilities.

use uuid::Uuid;

/// Identifier type shared by collections, folders, requests and executions.
///
/// Kept as a plain string so files written by other tools load unchanged.
pub type Id = String;

/// Generates a new time-ordered identifier (UUID v7) as a string.
#[must_use]
pub fn generate_id() -> Id {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_format() {
        let id = generate_id();
        // 8-4-4-4-12 = 36 chars
        assert_eq!(id.len(), 36);
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_generate_id_uniqueness() {
        let id1 = generate_id();
        let id2 = generate_id();
        assert_ne!(id1, id2);
    }
}
