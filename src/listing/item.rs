//! Listing items and field access
//!
//! The reducer never looks at concrete item types. It reads tags and
//! addresses fields by key name through [`Listable`], so any record that can
//! expose its fields as dynamic values can be listed.

use crate::codec::slugify;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Read access the reducer, sorter and census need from an item
pub trait Listable {
    /// Tags of the item, if it has a tag list at all
    fn tags(&self) -> Option<&[String]>;

    /// Value of a single field by key name
    fn field(&self, key: &str) -> Option<Cow<'_, Value>>;

    /// Values of every field, used by free-text search
    fn field_values(&self) -> Vec<Cow<'_, Value>>;
}

/// A listed entry
///
/// `id`, `title`, `tags` and `date` are known to the engine; any other key in
/// the source record is kept in `extra` and stays addressable by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Unix timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    /// Create an item with no tags, date or extra fields
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            tags: None,
            date: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub const fn with_date(mut self, date: i64) -> Self {
        self.date = Some(date);
        self
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Link to the item's detail page: `{base}/{id}/{slug}`
    #[must_use]
    pub fn href(&self, base: &str) -> String {
        format!("{}/{}/{}", base.trim_end_matches('/'), self.id, slugify(&self.title))
    }
}

impl Listable for Item {
    fn tags(&self) -> Option<&[String]> {
        self.tags.as_deref()
    }

    fn field(&self, key: &str) -> Option<Cow<'_, Value>> {
        match key {
            "id" => Some(Cow::Owned(Value::from(self.id))),
            "title" => Some(Cow::Owned(Value::from(self.title.as_str()))),
            "tags" => self
                .tags
                .as_ref()
                .map(|tags| Cow::Owned(Value::from(tags.clone()))),
            "date" => self.date.map(|date| Cow::Owned(Value::from(date))),
            other => self.extra.get(other).map(Cow::Borrowed),
        }
    }

    fn field_values(&self) -> Vec<Cow<'_, Value>> {
        let mut values = Vec::with_capacity(4 + self.extra.len());
        values.push(Cow::Owned(Value::from(self.id)));
        values.push(Cow::Owned(Value::from(self.title.as_str())));
        if let Some(tags) = &self.tags {
            values.push(Cow::Owned(Value::from(tags.clone())));
        }
        if let Some(date) = self.date {
            values.push(Cow::Owned(Value::from(date)));
        }
        values.extend(self.extra.values().map(Cow::Borrowed));
        values
    }
}

impl<T: Listable + ?Sized> Listable for &T {
    fn tags(&self) -> Option<&[String]> {
        (**self).tags()
    }

    fn field(&self, key: &str) -> Option<Cow<'_, Value>> {
        (**self).field(key)
    }

    fn field_values(&self) -> Vec<Cow<'_, Value>> {
        (**self).field_values()
    }
}
