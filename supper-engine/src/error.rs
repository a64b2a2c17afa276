//! Engine error types.

use crate::payload::PayloadError;
use supper_domain::DomainError;
use thiserror::Error;

/// Errors that can occur while ingesting a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Marked payload failed schema validation
    #[error("Payload error: {0}")]
    Payload(#[from] PayloadError),

    /// Domain error (genesis, pricing)
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
