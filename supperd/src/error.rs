//! Daemon error types.

use supper_domain::DomainError;
use supper_engine::EngineError;
use thiserror::Error;

/// Daemon-level errors.
#[derive(Debug, Error)]
pub enum DaemonError {
    /// Domain error
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Engine error
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading input or writing notices failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding a notice as JSON failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for daemon operations.
pub type DaemonResult<T> = Result<T, DaemonError>;
