//! Domain error types.
//!
//! These errors are local precondition failures. They are raised before
//! anything is sent to the backend and are distinct from API/IO errors.

/// Domain-level errors for request validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// The request cannot be sent as built (e.g. origin equals destination)
    #[error("invalid request: {0}")]
    InvalidRequest(&'static str),
}
