//! Sievr - filter state for tagged content listings
//!
//! A listing's filters (sort, search text, active tags, page) live in the
//! query string. This library decodes them, applies them to a dataset,
//! paginates the result and remembers the last query per route:
//!
//! - [`codec`]: typed values to and from compact query tokens
//! - [`listing`]: items, filter state, the reducer and the tag census
//! - [`pagination`]: page slices and page-number windows
//! - [`memory`]: per-route query memory
//! - [`session`]: the above wired together for one route

use thiserror::Error;

pub mod cli;
pub mod codec;
pub mod commands;
pub mod config;
pub mod listing;
pub mod memory;
pub mod output;
pub mod pagination;
pub mod search;
pub mod session;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum SievrError {
    /// Session could not be opened
    #[error("Session error: {0}")]
    SessionError(#[from] session::SessionError),
    /// Query memory error
    #[error("Query memory error: {0}")]
    MemoryError(#[from] memory::MemoryError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Dataset or value is not valid JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
