//! Error types for the backoffice core.

/// Result type for backoffice operations.
pub type Result<T> = std::result::Result<T, BackofficeError>;

/// Errors that can occur in backoffice business rules.
#[derive(Debug, thiserror::Error)]
pub enum BackofficeError {
    /// Caller-supplied data violates a business rule. Surfaced synchronously,
    /// never retried.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A generator could not find a free identifier within its attempt
    /// budget. Fatal for the current create operation.
    #[error("identifier space exhausted for {what} after {attempts} attempt(s)")]
    IdentitySpaceExhausted {
        /// Which identifier family ran out of attempts.
        what: &'static str,
        /// The attempt budget that was spent.
        attempts: u32,
    },
}
