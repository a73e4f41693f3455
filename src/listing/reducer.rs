//! Tag filter, stable sort and free-text search
//!
//! The steps run in a fixed order: tags narrow the set, the survivors are
//! sorted, and search narrows the sorted sequence. Changing the search text
//! therefore changes which items are shown, never their relative order.

use super::item::Listable;
use super::state::{FilterState, SortDirection};
use crate::codec::coerce::{is_numeric, to_number, to_text};
use serde_json::Value;
use std::cmp::Ordering;

/// Filter, sort and search a dataset according to the filter state
///
/// The dataset is only borrowed; the result holds references in display
/// order. Pagination is applied separately.
#[must_use]
pub fn reduce<'a, T: Listable>(items: &'a [T], state: &FilterState) -> Vec<&'a T> {
    let tagged = by_tags(items.iter(), &state.tags);
    let sorted = sort_by_key(tagged, &state.sort.key, state.sort.direction);
    by_search(sorted, &state.search)
}

/// Keep items sharing at least one tag with `active`
///
/// An empty `active` set keeps everything. Items without a tag list are
/// dropped as soon as any tag is active.
pub fn by_tags<'a, T, I>(items: I, active: &[String]) -> Vec<&'a T>
where
    T: Listable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    if active.is_empty() {
        return items.into_iter().collect();
    }

    items
        .into_iter()
        .filter(|item| {
            item.tags()
                .is_some_and(|tags| tags.iter().any(|tag| active.contains(tag)))
        })
        .collect()
}

/// Stable sort by the value of one field
///
/// Two values that both fail numeric coercion compare as case-sensitive
/// strings; otherwise they compare numerically. Values without a numeric
/// reading sort after all numeric ones, which keeps the order total for
/// mixed columns. Ties keep their original relative order.
#[must_use]
pub fn sort_by_key<'a, T: Listable>(
    items: Vec<&'a T>,
    key: &str,
    direction: SortDirection,
) -> Vec<&'a T> {
    let mut keyed: Vec<(SortValue, &'a T)> = items
        .into_iter()
        .map(|item| (SortValue::of(item.field(key).as_deref()), item))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match direction {
        SortDirection::Ascending => a.compare(b),
        SortDirection::Descending => b.compare(a),
    });

    keyed.into_iter().map(|(_, item)| item).collect()
}

/// Keep items with a non-numeric field containing `search`, case-insensitively
///
/// Numeric fields are never searched. An empty search keeps everything.
#[must_use]
pub fn by_search<'a, T: Listable>(items: Vec<&'a T>, search: &str) -> Vec<&'a T> {
    if search.is_empty() {
        return items;
    }

    let needle = search.to_lowercase();
    items
        .into_iter()
        .filter(|item| matches_search(*item, &needle))
        .collect()
}

fn matches_search<T: Listable>(item: &T, needle: &str) -> bool {
    item.field_values()
        .iter()
        .any(|value| !is_numeric(value) && to_text(value).to_lowercase().contains(needle))
}

/// Precomputed sort key of one field value
#[derive(Debug, Clone, PartialEq)]
enum SortValue {
    Number(f64),
    Text(String),
}

impl SortValue {
    fn of(value: Option<&Value>) -> Self {
        let Some(value) = value else {
            return Self::Text(String::new());
        };

        let number = to_number(value);
        if number.is_nan() {
            Self::Text(to_text(value))
        } else {
            Self::Number(number)
        }
    }

    const fn numeric(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Text(_) => f64::NAN,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.numeric().total_cmp(&other.numeric()),
        }
    }
}

/// Extension trait to reduce a slice of listable items in place of calling
/// [`reduce`] directly
///
/// ```
/// use sievr::config::SortConfig;
/// use sievr::listing::{FilterState, Item, ReduceExt};
///
/// let items = vec![Item::new(1, "Zeta"), Item::new(2, "Alpha")];
/// let state = FilterState::new(&SortConfig::default());
///
/// let titles: Vec<&str> = items.reduce(&state).iter().map(|i| i.title.as_str()).collect();
/// assert_eq!(titles, ["Zeta", "Alpha"]);
/// ```
pub trait ReduceExt<T: Listable> {
    fn reduce(&self, state: &FilterState) -> Vec<&T>;
}

impl<T: Listable> ReduceExt<T> for [T] {
    fn reduce(&self, state: &FilterState) -> Vec<&T> {
        reduce(self, state)
    }
}
