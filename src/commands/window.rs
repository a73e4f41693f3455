//! Window command - page-number window for a result count

use crate::{SievrError, config::ListingConfig, output, pagination::PaginationControls};
use colored::Colorize;

type Result<T> = std::result::Result<T, SievrError>;

/// Execute the window command
///
/// # Errors
/// Returns `SievrError::InvalidInput` if the page size is 0 or the window size is 0
pub fn execute(
    total: u64,
    page: u64,
    page_size: Option<u64>,
    window: Option<u64>,
    config: &ListingConfig,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let mut pagination = config.pagination.clone();
    if let Some(page_size) = page_size {
        pagination.page_size = page_size;
    }
    if let Some(window) = window {
        pagination.window_size = window;
    }

    if pagination.page_size == 0 {
        return Err(SievrError::InvalidInput("Page size must be at least 1".into()));
    }
    if pagination.window_size == 0 {
        return Err(SievrError::InvalidInput("Window size must be at least 1".into()));
    }

    let controls = PaginationControls::new(total, page, &pagination);
    if json {
        output::print_json(&controls)?;
        return Ok(());
    }

    if quiet {
        let pages: Vec<String> = controls.window.page_range.iter().map(u64::to_string).collect();
        println!("{}", pages.join(" "));
        return Ok(());
    }

    println!(
        "{} {} of {} ({:?})",
        "page".dimmed(),
        controls.current_page,
        controls.total_pages,
        controls.position()
    );
    if controls.is_visible() {
        println!("{}", output::pagination_bar(&controls));
    } else {
        println!("{}", "Single page, no pagination shown.".dimmed());
    }
    Ok(())
}
