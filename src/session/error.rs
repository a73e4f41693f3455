//! Session error types

use thiserror::Error;

/// Errors raised while opening a listing session
#[derive(Debug, Error)]
pub enum SessionError {
    /// A required collaborator was not supplied to the builder
    #[error("Missing required context: {0}")]
    MissingContext(&'static str),

    /// The listing configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
