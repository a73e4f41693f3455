//! Output formatting for CLI display
//!
//! Human-readable rendering of listing views, tag clouds and page windows.
//! Every helper takes a `quiet` flag where it makes sense: quiet output drops
//! decoration so it can be piped.

use crate::listing::{Item, Listable, TagCount};
use crate::pagination::{PageWindow, PaginationControls};
use crate::session::{SortOption, TagEntry};
use colored::Colorize;
use serde::Serialize;

/// Print a value as pretty JSON on stdout
///
/// # Errors
///
/// Returns `serde_json::Error` if the value cannot be serialized.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format an item with its tags and link
#[must_use]
pub fn item_line(item: &Item, base_path: &str, quiet: bool) -> String {
    if quiet {
        return item.title.clone();
    }

    let tags = item
        .tags()
        .filter(|tags| !tags.is_empty())
        .map(|tags| format!(" [{}]", tags.join(", ")))
        .unwrap_or_default();
    format!(
        "  {}{} {}",
        item.title.bold(),
        tags.cyan(),
        item.href(base_path).dimmed()
    )
}

/// Format the result count banner
#[must_use]
pub fn results_banner(total: usize) -> String {
    format!("results: {}", total.to_string().bold())
}

/// Format the tag cloud, highlighting active tags
#[must_use]
pub fn tag_cloud(entries: &[TagEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            if entry.active {
                format!("[{}]", entry.label).green().bold().to_string()
            } else {
                entry.label.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format the sort selector with the current option marked
#[must_use]
pub fn sort_selector(options: &[SortOption]) -> String {
    options
        .iter()
        .map(|option| {
            if option.selected {
                format!("> {}", option.label).yellow().to_string()
            } else {
                format!("  {}", option.label)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a page window with the current page bracketed
#[must_use]
pub fn page_window(window: &PageWindow, current_page: u64) -> String {
    window
        .page_range
        .iter()
        .map(|&page| {
            if page == current_page {
                format!("[{page}]").bold().to_string()
            } else {
                page.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a pagination bar: `« ‹ 1 [2] 3 › »`
///
/// Hidden buttons are left out entirely.
#[must_use]
pub fn pagination_bar(controls: &PaginationControls) -> String {
    let mut parts = Vec::new();
    if controls.first().is_some() {
        parts.push("«".to_string());
    }
    if controls.previous().is_some() {
        parts.push("‹".to_string());
    }
    parts.push(page_window(&controls.window, controls.current_page));
    if controls.next().is_some() {
        parts.push("›".to_string());
    }
    if controls.last().is_some() {
        parts.push("»".to_string());
    }
    parts.join(" ")
}

/// Format a tag with usage count
#[must_use]
pub fn tag_with_count(count: &TagCount, quiet: bool) -> String {
    if quiet {
        count.tag.clone()
    } else {
        format!("  {} (used by {} item(s))", count.tag, count.count)
    }
}
