//! Page-number window computation

use serde::Serialize;

/// Where the current page sits in the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPosition {
    /// Every page fits in the window
    None,
    /// On page 1, window pinned to the start
    First,
    /// On the last page, window pinned to the end
    Last,
    /// Window pinned to the start, not on page 1
    AtStart,
    /// Window pinned to the end, not on the last page
    AtEnd,
    /// Window centred on the current page
    Middle,
}

/// Page numbers to expose and the current page's position among them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub page_range: Vec<u64>,
    pub position: WindowPosition,
}

/// Number of pages needed for `total_items`; 0 for an empty listing
#[must_use]
pub const fn total_pages(total_items: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Compute the page-number window
///
/// With `half = window_size / 2`:
/// - all pages fit: every page, [`WindowPosition::None`]
/// - `current_page <= ceil(window_size / 2)`: the first `window_size` pages
/// - `current_page + half >= total_pages`: the last `window_size` pages
/// - otherwise `current_page - half ..= current_page + half`
///
/// ```
/// use sievr::pagination::{WindowPosition, compute_window};
///
/// let window = compute_window(20, 6, 3, 3);
/// assert_eq!(window.page_range, [2, 3, 4]);
/// assert_eq!(window.position, WindowPosition::AtEnd);
/// ```
#[must_use]
pub fn compute_window(total_items: u64, page_size: u64, current_page: u64, window_size: u64) -> PageWindow {
    let total = total_pages(total_items, page_size);
    let half = window_size / 2;

    if window_size >= total {
        return PageWindow {
            page_range: (1..=total).collect(),
            position: WindowPosition::None,
        };
    }

    if current_page <= window_size.div_ceil(2) {
        return PageWindow {
            page_range: (1..=window_size).collect(),
            position: if current_page == 1 {
                WindowPosition::First
            } else {
                WindowPosition::AtStart
            },
        };
    }

    if current_page.saturating_add(half) >= total {
        return PageWindow {
            page_range: (total - window_size + 1..=total).collect(),
            position: if current_page == total {
                WindowPosition::Last
            } else {
                WindowPosition::AtEnd
            },
        };
    }

    PageWindow {
        page_range: (current_page - half..=current_page + half).collect(),
        position: WindowPosition::Middle,
    }
}
