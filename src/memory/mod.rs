//! Query memory: the last encoded query per route
//!
//! A listing writes its query here on every change and reads it back when the
//! route is opened again, so filters survive navigation regardless of what
//! the address bar carries. Entries are overwritten, never removed.
//!
//! [`QueryStore`] is the seam; [`MemoryQueryStore`] lives for the process and
//! [`FileQueryStore`] persists between runs.

pub mod error;
pub mod file;
pub mod memory_store;

pub use error::{MemoryError, Result};
pub use file::FileQueryStore;
pub use memory_store::MemoryQueryStore;

/// Key-value store from route identifier to encoded query
pub trait QueryStore {
    /// Last query stored for `route`
    fn get(&self, route: &str) -> Option<String>;

    /// Store `query` for `route`
    ///
    /// Returns `false` when the stored value was already `query`; observers
    /// keyed on [`QueryStore::revision`] are not notified in that case.
    fn set(&self, route: &str, query: &str) -> bool;

    /// Counter bumped on every effective `set`
    fn revision(&self) -> u64;
}

impl<S: QueryStore + ?Sized> QueryStore for &S {
    fn get(&self, route: &str) -> Option<String> {
        (**self).get(route)
    }

    fn set(&self, route: &str, query: &str) -> bool {
        (**self).set(route, query)
    }

    fn revision(&self) -> u64 {
        (**self).revision()
    }
}
