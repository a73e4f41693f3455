//! Configuration module for sievr
//!
//! Holds the listing switches: which keys are sortable and the default sort,
//! search debounce, page size and window, tag cloud cap, and result banner.
//! Configuration is stored as TOML in the user's config directory; every
//! field has a default, so a missing file or a partial file is fine.

use crate::codec::value::{ARRAY_SENTINEL, ELEMENT_DELIMITER, PAIR_SEPARATOR, decode_value, encode_component};
use crate::listing::{SortDirection, SortSpec};
use serde_json::Value;
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Page-number windows that keep the current page centred
pub const WINDOW_SIZES: [u64; 4] = [3, 5, 7, 9];

/// Sort options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SortConfig {
    /// Show the sort selector
    pub show: bool,
    /// Field names that may be sorted on
    pub keys: Vec<String>,
    /// Sort key used when the query carries none
    pub default_key: String,
    pub default_direction: SortDirection,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            show: true,
            keys: vec!["date".to_string(), "title".to_string()],
            default_key: "title".to_string(),
            default_direction: SortDirection::Descending,
        }
    }
}

impl SortConfig {
    #[must_use]
    pub fn default_spec(&self) -> SortSpec {
        SortSpec::new(self.default_key.clone(), self.default_direction)
    }

    /// Whether `key` may be sorted on
    #[must_use]
    pub fn allows(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Selectable sort options for the configured keys
    #[must_use]
    pub fn options(&self) -> Vec<SortSpec> {
        SortSpec::options(&self.keys)
    }
}

/// Search box options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    pub show: bool,
    /// Delay before a keystroke is committed, in milliseconds
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            show: true,
            debounce_ms: 150,
        }
    }
}

impl SearchConfig {
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Pagination options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PaginationConfig {
    /// When off, the whole filtered sequence is one page
    pub show: bool,
    pub page_size: u64,
    /// Number of page buttons shown at once
    pub window_size: u64,
    pub show_next_prev: bool,
    pub show_first_last: bool,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            show: true,
            page_size: 6,
            window_size: 3,
            show_next_prev: true,
            show_first_last: true,
        }
    }
}

/// Tag cloud options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TagsConfig {
    pub show: bool,
    /// Maximum number of tags in the cloud; 0 shows all of them
    pub max: usize,
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self { show: true, max: 7 }
    }
}

impl TagsConfig {
    #[must_use]
    pub const fn cap(&self) -> Option<usize> {
        if self.max == 0 { None } else { Some(self.max) }
    }
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ListingConfig {
    /// Show the "results: N" banner
    pub show_results: bool,
    /// Path prefix for item detail links
    pub base_path: String,
    pub sort: SortConfig,
    pub search: SearchConfig,
    pub pagination: PaginationConfig,
    pub tags: TagsConfig,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            show_results: true,
            base_path: "/blog".to_string(),
            sort: SortConfig::default(),
            search: SearchConfig::default(),
            pagination: PaginationConfig::default(),
            tags: TagsConfig::default(),
        }
    }
}

impl ListingConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("sievr").join("config.toml"))
    }

    /// Load configuration from the default location
    ///
    /// A missing file yields the defaults; nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed or validated.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed or validated.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Check the values serde cannot check on its own
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` if:
    /// - the page size is 0
    /// - the window size is not 3, 5, 7 or 9
    /// - no sortable keys are configured
    /// - a sortable key would not decode back from a query (see [`query_safe_key`])
    /// - the default sort key is not one of the sortable keys
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pagination.page_size == 0 {
            return Err(ConfigError::Message("pagination.page_size must be at least 1".to_string()));
        }

        if !WINDOW_SIZES.contains(&self.pagination.window_size) {
            return Err(ConfigError::Message(format!(
                "pagination.window_size must be one of {WINDOW_SIZES:?}, got {}",
                self.pagination.window_size
            )));
        }

        if self.sort.keys.is_empty() {
            return Err(ConfigError::Message("sort.keys must name at least one field".to_string()));
        }

        if let Some(key) = self.sort.keys.iter().find(|key| !query_safe_key(key)) {
            return Err(ConfigError::Message(format!(
                "sort.keys entry '{key}' cannot be carried in a query: it must not be empty, \
                 contain '{ELEMENT_DELIMITER}', '{PAIR_SEPARATOR}' or '{ARRAY_SENTINEL}', \
                 or read as a number or boolean"
            )));
        }

        if !self.sort.allows(&self.sort.default_key) {
            return Err(ConfigError::Message(format!(
                "sort.default_key '{}' is not listed in sort.keys",
                self.sort.default_key
            )));
        }

        Ok(())
    }
}

/// Whether a sort key comes back unchanged from the `sort` query token
///
/// The key sits inside an array token, so the codec delimiters would split it
/// and a key that reads as a number or boolean would lose its type.
#[must_use]
pub fn query_safe_key(key: &str) -> bool {
    !key.is_empty()
        && ![ELEMENT_DELIMITER, PAIR_SEPARATOR, ARRAY_SENTINEL]
            .iter()
            .any(|delimiter| key.contains(delimiter))
        && decode_value(&encode_component(key)) == Value::String(key.to_string())
}
