//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and the loaded configuration.

pub mod decode;
pub mod encode;
pub mod memory;
pub mod tags;
pub mod view;
pub mod window;

// Re-export execute functions for convenience
pub use decode::execute as decode;
pub use encode::execute as encode;
pub use memory::execute as memory;
pub use tags::execute as tags;
pub use view::execute as view;
pub use window::execute as window;

use crate::{SievrError, listing::Item};
use std::path::Path;

/// Load a dataset: a JSON array of items
///
/// # Errors
/// Returns an error if the file cannot be read or is not a JSON array of items
pub fn load_items(path: &Path) -> Result<Vec<Item>, SievrError> {
    let data = std::fs::read(path).map_err(|e| {
        SievrError::InvalidInput(format!("Cannot read dataset '{}': {e}", path.display()))
    })?;
    let items: Vec<Item> = serde_json::from_slice(&data)?;
    tracing::debug!(path = %path.display(), count = items.len(), "loaded dataset");
    Ok(items)
}
