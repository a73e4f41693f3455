//! Pagination buttons derived from a page window
//!
//! Visibility of the boundary buttons comes from the window position alone:
//!
//! | button   | hidden when              |
//! |----------|--------------------------|
//! | first    | `First`, `AtStart`, `None` |
//! | previous | `First`, `None`          |
//! | next     | `Last`, `None`           |
//! | last     | `Last`, `AtEnd`, `None`  |

use super::window::{PageWindow, WindowPosition, compute_window, total_pages};
use crate::config::PaginationConfig;
use serde::Serialize;

/// A page button in the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageButton {
    pub page: u64,
    pub active: bool,
}

/// Everything a pagination bar needs to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationControls {
    pub window: PageWindow,
    pub current_page: u64,
    pub total_pages: u64,
    pub show_next_prev: bool,
    pub show_first_last: bool,
}

impl PaginationControls {
    /// Build the controls for a filtered result count
    #[must_use]
    pub fn new(total_items: u64, current_page: u64, config: &PaginationConfig) -> Self {
        Self {
            window: compute_window(total_items, config.page_size, current_page, config.window_size),
            current_page,
            total_pages: total_pages(total_items, config.page_size),
            show_next_prev: config.show_next_prev,
            show_first_last: config.show_first_last,
        }
    }

    /// A single page needs no pagination bar
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.total_pages != 1
    }

    #[must_use]
    pub const fn position(&self) -> WindowPosition {
        self.window.position
    }

    /// Target of the jump-to-first button, if shown
    #[must_use]
    pub const fn first(&self) -> Option<u64> {
        match self.position() {
            _ if !self.show_first_last => None,
            WindowPosition::First | WindowPosition::AtStart | WindowPosition::None => None,
            _ => Some(1),
        }
    }

    /// Target of the previous button, if shown
    #[must_use]
    pub const fn previous(&self) -> Option<u64> {
        match self.position() {
            _ if !self.show_next_prev => None,
            WindowPosition::First | WindowPosition::None => None,
            _ => Some(self.current_page.saturating_sub(1)),
        }
    }

    /// Target of the next button, if shown
    #[must_use]
    pub const fn next(&self) -> Option<u64> {
        match self.position() {
            _ if !self.show_next_prev => None,
            WindowPosition::Last | WindowPosition::None => None,
            _ => Some(self.current_page.saturating_add(1)),
        }
    }

    /// Target of the jump-to-last button, if shown
    #[must_use]
    pub const fn last(&self) -> Option<u64> {
        match self.position() {
            _ if !self.show_first_last => None,
            WindowPosition::Last | WindowPosition::AtEnd | WindowPosition::None => None,
            _ => Some(self.total_pages),
        }
    }

    /// Page buttons in window order, with the current page marked
    pub fn pages(&self) -> impl Iterator<Item = PageButton> + '_ {
        self.window.page_range.iter().map(|&page| PageButton {
            page,
            active: page == self.current_page,
        })
    }
}
