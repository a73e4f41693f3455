//! Page slicing and page-number windows
//!
//! [`window`] decides which page numbers to expose and how the current page
//! sits within them; [`controls`] derives button visibility from that
//! position. Slicing never clamps: a page past the end is simply empty.

pub mod controls;
pub mod window;

pub use controls::PaginationControls;
pub use window::{PageWindow, WindowPosition, compute_window, total_pages};

/// Items shown on a 1-based page
///
/// Page 0 and pages past the end yield an empty slice.
///
/// ```
/// use sievr::pagination::slice;
///
/// let items = [1, 2, 3, 4, 5];
/// assert_eq!(slice(&items, 2, 2), &[3, 4]);
/// assert_eq!(slice(&items, 3, 2), &[5]);
/// assert!(slice(&items, 4, 2).is_empty());
/// ```
#[must_use]
pub fn slice<T>(items: &[T], page: u64, page_size: u64) -> &[T] {
    let Some(first) = page.checked_sub(1) else {
        return &[];
    };

    let len = items.len();
    let start = usize::try_from(first.saturating_mul(page_size)).unwrap_or(usize::MAX);
    if start >= len {
        return &[];
    }
    let size = usize::try_from(page_size).unwrap_or(usize::MAX);
    let end = start.saturating_add(size).min(len);
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_first_and_last_page() {
        let items: Vec<u32> = (1..=20).collect();
        assert_eq!(slice(&items, 1, 6), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(slice(&items, 4, 6), &[19, 20]);
    }

    #[test]
    fn test_slice_out_of_range_is_empty() {
        let items: Vec<u32> = (1..=20).collect();
        assert!(slice(&items, 0, 6).is_empty());
        assert!(slice(&items, 5, 6).is_empty());
        assert!(slice(&items, u64::MAX, 6).is_empty());
    }

    #[test]
    fn test_slice_zero_page_size_is_empty() {
        let items = [1, 2, 3];
        assert!(slice(&items, 1, 0).is_empty());
    }

    #[test]
    fn test_slice_empty_input() {
        let items: [u8; 0] = [];
        assert!(slice(&items, 1, 6).is_empty());
    }
}
