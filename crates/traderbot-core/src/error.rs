//! Error types for traderbot-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid action: {0}")]
    InvalidAction(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
