//! Error types for the backoffice engine.

use backoffice_core::BackofficeError;
use backoffice_store::StoreError;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur in engine operations.
///
/// Absence of data is not an error here: a customer without an account or a
/// pull without a live report yields empty results or placeholder values.
/// Duplicate-key collisions never surface either; the generators absorb
/// exactly that condition and retry.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A business rule was violated (validation failure, exhausted
    /// identifier space).
    #[error(transparent)]
    Domain(#[from] BackofficeError),

    /// Storage error, propagated unretried.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl EngineError {
    /// Convenience constructor for validation failures.
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Domain(BackofficeError::Validation(msg.into()))
    }
}
