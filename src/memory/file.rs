//! Query store persisted to a JSON file
//!
//! The store file (`~/.cache/sievr/queries.json`) holds one entry per route.
//! It is read once on open and rewritten after every effective `set`.

use super::error::{MemoryError, Result};
use super::QueryStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

const STORE_FILENAME: &str = "queries.json";
const STORE_VERSION: u32 = 1;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    queries: BTreeMap<String, String>,
}

/// Query store that survives restarts
#[derive(Debug)]
pub struct FileQueryStore {
    path: PathBuf,
    queries: Mutex<BTreeMap<String, String>>,
    revision: AtomicU64,
}

impl FileQueryStore {
    /// Default store location under the user's cache directory
    ///
    /// # Errors
    ///
    /// Returns `MemoryError::NoCacheDir` if the cache directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        dirs::cache_dir()
            .map(|d| d.join("sievr").join(STORE_FILENAME))
            .ok_or(MemoryError::NoCacheDir)
    }

    /// Open the store at the default location
    ///
    /// # Errors
    ///
    /// Returns `MemoryError::NoCacheDir` if the cache directory cannot be determined.
    pub fn open_default() -> Result<Self> {
        Ok(Self::open(Self::default_path()?))
    }

    /// Open the store at `path`
    ///
    /// Starts empty if:
    /// - the file doesn't exist (first run)
    /// - the file is corrupted
    /// - the version doesn't match
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let queries = Self::read(&path);
        tracing::debug!(path = %path.display(), routes = queries.len(), "opened query store");

        Self {
            path,
            queries: Mutex::new(queries),
            revision: AtomicU64::new(0),
        }
    }

    fn read(path: &Path) -> BTreeMap<String, String> {
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read query store");
                return BTreeMap::new();
            }
        };

        match serde_json::from_slice::<StoreFile>(&data) {
            Ok(file) if file.version == STORE_VERSION => file.queries,
            Ok(file) => {
                tracing::warn!(version = file.version, "query store version mismatch, starting empty");
                BTreeMap::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "query store is corrupted, starting empty");
                BTreeMap::new()
            }
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Routes with a stored query, in sorted order
    #[must_use]
    pub fn routes(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    /// Write the store to disk
    ///
    /// # Errors
    ///
    /// Returns `MemoryError` if the directory cannot be created or the file
    /// cannot be serialized or written.
    pub fn save(&self) -> Result<()> {
        let file = StoreFile {
            version: STORE_VERSION,
            queries: self.lock().clone(),
        };
        Self::write(&self.path, &file)
    }

    fn write(path: &Path, file: &StoreFile) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(file)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.queries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl QueryStore for FileQueryStore {
    fn get(&self, route: &str) -> Option<String> {
        self.lock().get(route).cloned()
    }

    fn set(&self, route: &str, query: &str) -> bool {
        {
            let mut queries = self.lock();
            if queries.get(route).map(String::as_str) == Some(query) {
                tracing::debug!(route, "query unchanged, skipping store");
                return false;
            }
            queries.insert(route.to_string(), query.to_string());
        }
        self.revision.fetch_add(1, Ordering::Relaxed);

        // Best effort: the in-process value is still authoritative
        if let Err(e) = self.save() {
            tracing::warn!(path = %self.path.display(), error = %e, "could not persist query store");
        }
        true
    }

    fn revision(&self) -> u64 {
        self.revision.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileQueryStore::open(dir.path().join("queries.json"));
        assert_eq!(store.get("/blog"), None);
        assert!(store.routes().is_empty());
    }

    #[test]
    fn test_set_persists_across_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("queries.json");

        let store = FileQueryStore::open(&path);
        assert!(store.set("/blog", "page=2"));
        assert!(store.set("/news", "search=rust"));
        drop(store);

        let reopened = FileQueryStore::open(&path);
        assert_eq!(reopened.get("/blog").as_deref(), Some("page=2"));
        assert_eq!(reopened.routes(), vec!["/blog".to_string(), "/news".to_string()]);
    }

    #[test]
    fn test_set_same_value_is_noop() {
        let dir = TempDir::new().unwrap();
        let store = FileQueryStore::open(dir.path().join("queries.json"));
        assert!(store.set("/blog", "page=2"));
        assert!(!store.set("/blog", "page=2"));
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_corrupted_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("queries.json");
        std::fs::write(&path, b"{not json").unwrap();

        let store = FileQueryStore::open(&path);
        assert_eq!(store.get("/blog"), None);

        assert!(store.set("/blog", "page=1"));
        let reopened = FileQueryStore::open(&path);
        assert_eq!(reopened.get("/blog").as_deref(), Some("page=1"));
    }

    #[test]
    fn test_version_mismatch_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("queries.json");
        std::fs::write(&path, r#"{"version":99,"queries":{"/blog":"page=2"}}"#).unwrap();

        let store = FileQueryStore::open(&path);
        assert_eq!(store.get("/blog"), None);
    }
}
