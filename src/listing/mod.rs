//! Listing data model and pure list transformations
//!
//! - [`item`]: the `Item` record and the [`Listable`] access trait
//! - [`state`]: filter state and its mapping to and from a query string
//! - [`reducer`]: tag filter, stable sort and search over a dataset
//! - [`census`]: ranked tag frequencies over a whole dataset

pub mod census;
pub mod item;
pub mod reducer;
pub mod state;

pub use census::{TagCount, census, count_tags};
pub use item::{Item, Listable};
pub use reducer::{ReduceExt, reduce};
pub use state::{FilterState, QUERY_KEYS, SortDirection, SortSpec};
