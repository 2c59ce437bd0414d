//! Error types for backoffice storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Record not found.
    #[error("not found")]
    NotFound,

    /// A unique insert collided with an existing row.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
}

impl StoreError {
    /// Whether this error reports a primary-key/uniqueness violation.
    ///
    /// Generators retry on exactly this condition and propagate everything
    /// else, so callers never depend on a storage-engine error code.
    #[must_use]
    pub const fn is_uniqueness_violation(&self) -> bool {
        matches!(self, Self::DuplicateKey(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_duplicate_key_is_a_uniqueness_violation() {
        assert!(StoreError::DuplicateKey("ABCD1234".into()).is_uniqueness_violation());
        assert!(!StoreError::NotFound.is_uniqueness_violation());
        assert!(!StoreError::Database("io".into()).is_uniqueness_violation());
        assert!(!StoreError::Serialization("cbor".into()).is_uniqueness_violation());
    }
}
