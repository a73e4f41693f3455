//! Rendered output of a listing session

use crate::listing::SortSpec;
use crate::pagination::{PageWindow, PaginationControls};
use serde::Serialize;

/// One entry of the tag cloud
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagEntry {
    /// Tag as it appears in the data, used for toggling
    pub tag: String,
    /// Lower-cased display form
    pub label: String,
    pub active: bool,
}

/// One entry of the sort selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortOption {
    pub label: String,
    pub value: String,
    pub selected: bool,
}

impl SortOption {
    pub(crate) fn new(spec: &SortSpec, current: &SortSpec) -> Self {
        Self {
            label: spec.to_string(),
            value: spec.option_value(),
            selected: spec == current,
        }
    }
}

/// Everything needed to render the current page of a listing
///
/// Disabled widgets come back empty: no tags when the tag cloud is hidden,
/// no sort options when the selector is hidden, no controls when pagination
/// is off or there is only one page.
#[derive(Debug, Clone, Serialize)]
pub struct ListingView<'a, T> {
    /// Items on the current page, in display order
    pub items: Vec<&'a T>,
    /// Number of items that passed the filters, across all pages
    pub total_filtered: usize,
    pub page: u64,
    /// Page-number window, computed even when the controls are hidden
    pub window: PageWindow,
    pub search: String,
    pub sort_options: Vec<SortOption>,
    pub tags: Vec<TagEntry>,
    pub controls: Option<PaginationControls>,
    pub show_results: bool,
}

impl<T> ListingView<'_, T> {
    /// No item passed the filters
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_filtered == 0
    }
}

/// Where the host should navigate after a filter change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Encoded query, without a leading `?`
    pub query: String,
    /// `route?query`, or just `route` for an empty query
    pub location: String,
    /// Whether query memory took a new value
    pub changed: bool,
}

impl Navigation {
    pub(crate) fn new(route: &str, query: String, changed: bool) -> Self {
        let location = if query.is_empty() {
            route.to_string()
        } else {
            format!("{route}?{query}")
        };
        Self {
            query,
            location,
            changed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::SortDirection;

    #[test]
    fn test_navigation_location() {
        let nav = Navigation::new("/blog", "page=2".to_string(), true);
        assert_eq!(nav.location, "/blog?page=2");

        let nav = Navigation::new("/blog", String::new(), false);
        assert_eq!(nav.location, "/blog");
    }

    #[test]
    fn test_sort_option_selected() {
        let current = SortSpec::new("title", SortDirection::Descending);
        let option = SortOption::new(&SortSpec::new("title", SortDirection::Descending), &current);
        assert_eq!(option.label, "title - descending");
        assert_eq!(option.value, "title#descending");
        assert!(option.selected);

        let option = SortOption::new(&SortSpec::new("date", SortDirection::Ascending), &current);
        assert!(!option.selected);
    }
}
