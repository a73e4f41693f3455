//! Ranked tag frequencies
//!
//! The census is taken over the full dataset, not the filtered subset, so the
//! tag cloud keeps its shape while filters narrow the results.

use super::item::Listable;
use serde::Serialize;
use std::collections::HashMap;

/// A tag and the number of items carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Count tag occurrences, most frequent first
///
/// Ties keep the order in which the tags were first encountered in the
/// dataset.
#[must_use]
pub fn count_tags<T: Listable>(items: &[T]) -> Vec<TagCount> {
    let mut counts: Vec<TagCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for tag in items.iter().filter_map(Listable::tags).flatten() {
        if let Some(&pos) = index.get(tag.as_str()) {
            counts[pos].count += 1;
        } else {
            index.insert(tag.as_str(), counts.len());
            counts.push(TagCount {
                tag: tag.clone(),
                count: 1,
            });
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Ranked, deduplicated tag list, optionally capped at `max` entries
///
/// ```
/// use sievr::listing::{Item, census};
///
/// let items = vec![
///     Item::new(1, "a").with_tags(["a", "b"]),
///     Item::new(2, "b").with_tags(["a"]),
///     Item::new(3, "c").with_tags(["c"]),
/// ];
/// assert_eq!(census(&items, None), ["a", "b", "c"]);
/// assert_eq!(census(&items, Some(2)), ["a", "b"]);
/// ```
#[must_use]
pub fn census<T: Listable>(items: &[T], max: Option<usize>) -> Vec<String> {
    let ranked = count_tags(items).into_iter().map(|count| count.tag);
    match max {
        Some(max) => ranked.take(max).collect(),
        None => ranked.collect(),
    }
}
