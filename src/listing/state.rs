//! Filter state and its query-string representation
//!
//! The state is decoded from the keys `sort`, `page`, `search` and `tags`.
//! Whatever does not decode into the expected shape falls back to its
//! default, so a corrupt or foreign query degrades to the unfiltered first
//! page instead of failing.

use crate::codec::coerce::{number_text, to_text};
use crate::codec::{decode_query, encode_query};
use crate::config::SortConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;
use std::str::FromStr;

/// Query keys the filter state reads and writes
pub const QUERY_KEYS: [&str; 4] = ["sort", "page", "search", "tags"];

/// Sort direction, spelled `ascending` / `descending` in queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascending" => Ok(Self::Ascending),
            "descending" => Ok(Self::Descending),
            other => Err(format!("unknown sort direction '{other}'")),
        }
    }
}

/// A sort key together with its direction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    #[must_use]
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    /// Selectable sort options: for every key, descending then ascending
    #[must_use]
    pub fn options<S: AsRef<str>>(keys: &[S]) -> Vec<Self> {
        keys.iter()
            .flat_map(|key| {
                [
                    Self::new(key.as_ref(), SortDirection::Descending),
                    Self::new(key.as_ref(), SortDirection::Ascending),
                ]
            })
            .collect()
    }

    /// The `key#direction` form used as an option value
    #[must_use]
    pub fn option_value(&self) -> String {
        format!("{}#{}", self.key, self.direction)
    }

    fn to_value(&self) -> Value {
        json!([self.key, self.direction.as_str()])
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value.as_array()?.as_slice() {
            [Value::String(key), Value::String(direction)] => {
                Some(Self::new(key.clone(), direction.parse().ok()?))
            }
            _ => None,
        }
    }
}

impl fmt::Display for SortSpec {
    /// Option label, e.g. `title - descending`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.key, self.direction)
    }
}

impl FromStr for SortSpec {
    type Err = String;

    /// Parse the `key#direction` option value
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, direction) = s
            .split_once('#')
            .ok_or_else(|| format!("expected 'key#direction', got '{s}'"))?;
        if key.is_empty() {
            return Err(format!("missing sort key in '{s}'"));
        }
        Ok(Self::new(key, direction.parse()?))
    }
}

/// Filter state driving the visible subset of a listing
///
/// `page` is 1-based and never below 1. `tags` keeps insertion order so the
/// encoded query is deterministic; membership is what matters for filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub sort: SortSpec,
    pub search: String,
    pub tags: Vec<String>,
    pub page: u64,
}

impl FilterState {
    /// Unfiltered first page with the configured default sort
    #[must_use]
    pub fn new(sort: &SortConfig) -> Self {
        Self {
            sort: sort.default_spec(),
            search: String::new(),
            tags: Vec::new(),
            page: 1,
        }
    }

    /// Decode filter state from a query string
    ///
    /// Sort keys outside `sort.keys` are rejected in favour of the default
    /// sort. Pages below 1 fall back to 1; pages past the end are kept.
    #[must_use]
    pub fn from_query(query: &str, sort: &SortConfig) -> Self {
        let Some(decoded) = decode_query(query, &QUERY_KEYS) else {
            return Self::new(sort);
        };
        Self::from_decoded(&decoded, sort)
    }

    /// Build filter state from already decoded query values
    #[must_use]
    pub fn from_decoded(decoded: &Map<String, Value>, sort: &SortConfig) -> Self {
        let mut state = Self::new(sort);

        if let Some(value) = decoded.get("sort") {
            match SortSpec::from_value(value) {
                Some(spec) if sort.allows(&spec.key) => state.sort = spec,
                Some(spec) => {
                    tracing::debug!(key = %spec.key, "sort key is not sortable, using default");
                }
                None => tracing::debug!(%value, "malformed sort value, using default"),
            }
        }

        if let Some(search) = decoded.get("search").and_then(scalar_text) {
            state.search = search;
        }

        if let Some(Value::Array(tags)) = decoded.get("tags") {
            for tag in tags.iter().filter_map(scalar_text) {
                if !tag.is_empty() && !state.tags.contains(&tag) {
                    state.tags.push(tag);
                }
            }
        }

        if let Some(page) = decoded.get("page").and_then(Value::as_f64)
            && page >= 1.0
        {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let page = page.floor() as u64;
            state.page = page;
        }

        state
    }

    /// The patch written back to the query, in a fixed key order
    #[must_use]
    pub fn to_patch(&self) -> [(&'static str, Value); 4] {
        [
            ("sort", self.sort.to_value()),
            ("search", Value::from(self.search.as_str())),
            ("tags", Value::from(self.tags.clone())),
            ("page", Value::from(self.page)),
        ]
    }

    /// Merge this state into an existing query string
    ///
    /// Empty search and empty tags remove their keys; keys the state does
    /// not own are left untouched.
    #[must_use]
    pub fn encode_onto(&self, existing: &str) -> String {
        encode_query(existing, &self.to_patch())
    }

    /// Toggle a tag on or off and return to the first page
    ///
    /// Returns `true` if the tag is now active.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        self.page = 1;
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
            false
        } else {
            self.tags.push(tag.to_string());
            true
        }
    }

    /// Replace the active tags and return to the first page
    pub fn set_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.clear();
        for tag in tags {
            let tag = tag.into();
            if !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
        self.page = 1;
    }

    pub fn clear_tags(&mut self) {
        self.set_tags(std::iter::empty::<String>());
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
        self.page = 1;
    }

    /// Move to a page without touching the other filters
    ///
    /// Pages past the end are allowed and produce an empty slice.
    pub fn set_page(&mut self, page: u64) {
        self.page = page.max(1);
    }

    #[must_use]
    pub fn is_tag_active(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Text of a scalar query value; arrays and objects have none
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        Value::Bool(_) => Some(to_text(value)),
        _ => None,
    }
}
