//! Tags command - ranked tag census of a dataset

use super::load_items;
use crate::{SievrError, config::ListingConfig, listing::count_tags, output};

type Result<T> = std::result::Result<T, SievrError>;

/// Execute the tags command
///
/// `max` overrides the configured cap; 0 lists every tag.
///
/// # Errors
/// Returns an error if the dataset cannot be read
pub fn execute(data: &std::path::Path, max: Option<usize>, config: &ListingConfig, json: bool, quiet: bool) -> Result<()> {
    let items = load_items(data)?;
    let cap = match max {
        Some(0) => None,
        Some(max) => Some(max),
        None => config.tags.cap(),
    };

    let mut counts = count_tags(&items);
    if let Some(cap) = cap {
        counts.truncate(cap);
    }

    if json {
        output::print_json(&counts)?;
        return Ok(());
    }

    if counts.is_empty() {
        if !quiet {
            println!("No tags found in dataset.");
        }
        return Ok(());
    }

    if !quiet {
        println!("Tags in dataset:");
    }
    for count in &counts {
        println!("{}", output::tag_with_count(count, quiet));
    }
    Ok(())
}
