//! Query memory error types

use thiserror::Error;

/// Errors raised by persistent query stores
#[derive(Debug, Error)]
pub enum MemoryError {
    /// IO error while reading or writing the store file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Store file could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No cache directory on this platform
    #[error("Could not determine cache directory")]
    NoCacheDir,
}

/// Result type for query memory operations
pub type Result<T> = std::result::Result<T, MemoryError>;
