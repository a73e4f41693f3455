//! Process-lifetime query store

use super::QueryStore;
use moka::ops::compute::{CompResult, Op};
use moka::sync::Cache;
use std::sync::atomic::{AtomicU64, Ordering};

/// In-process query store backed by an unbounded moka cache
///
/// Safe to share between threads: the compare and the write of `set` run as
/// one compute operation on the route's entry.
pub struct MemoryQueryStore {
    entries: Cache<String, String>,
    revision: AtomicU64,
}

impl MemoryQueryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Cache::builder().build(),
            revision: AtomicU64::new(0),
        }
    }
}

impl Default for MemoryQueryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryQueryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryQueryStore")
            .field("revision", &self.revision())
            .finish_non_exhaustive()
    }
}

impl QueryStore for MemoryQueryStore {
    fn get(&self, route: &str) -> Option<String> {
        self.entries.get(route)
    }

    fn set(&self, route: &str, query: &str) -> bool {
        let result = self.entries.entry_by_ref(route).and_compute_with(|current| {
            if current.is_some_and(|entry| entry.value().as_str() == query) {
                Op::Nop
            } else {
                Op::Put(query.to_string())
            }
        });

        match result {
            CompResult::Inserted(_) | CompResult::ReplacedWith(_) => {
                self.revision.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(route, query, "stored query");
                true
            }
            _ => {
                tracing::debug!(route, "query unchanged, skipping store");
                false
            }
        }
    }

    fn revision(&self) -> u64 {
        self.revision.load(Ordering::Relaxed)
    }
}
