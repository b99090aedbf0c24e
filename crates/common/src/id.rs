//! ID generation utilities.

use ulid::Ulid;
use uuid::Uuid;

/// ID generator for entities.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    _private: (),
}

impl IdGenerator {
    /// Create a new ID generator.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Generate a new ULID-based ID.
    ///
    /// Used for question identifiers and document IDs. ULIDs are
    /// lexicographically sortable and never reused, which keeps
    /// answer-to-question linkage stable when question order changes.
    #[must_use]
    pub fn generate(&self) -> String {
        Ulid::new().to_string().to_lowercase()
    }

    /// Generate a new account ID in the backend's expected shape.
    #[must_use]
    pub fn generate_account_id(&self) -> String {
        format!("user_{}", Uuid::new_v4().simple())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_ulid() {
        let id_gen = IdGenerator::new();
        let id1 = id_gen.generate();
        let id2 = id_gen.generate();

        assert_eq!(id1.len(), 26);
        assert_eq!(id2.len(), 26);
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_generate_account_id() {
        let id_gen = IdGenerator::new();
        let id = id_gen.generate_account_id();

        assert!(id.starts_with("user_"));
        assert_eq!(id.len(), "user_".len() + 32);
    }
}
