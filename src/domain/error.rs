//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the simulation's contracts.
/// These are independent of configuration loading and CLI concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid configuration: {field}: {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },

    #[error("network depth {depth} exceeds supported maximum {max}")]
    OutOfRange { depth: u32, max: u32 },

    #[error("internal invariant violation: {0}")]
    InternalInvariantViolation(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
