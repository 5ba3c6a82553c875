use crate::bookmarks::BOOKMARKS_KEY;
use crate::views::ViewOrder;
use ainav_storage::{DisabledStore, FileStore, KeyValueStore, MemoryStore, SqliteStore};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
///
/// Loaded from `<config dir>/ainav/config.toml`. A missing file means
/// defaults; a file that doesn't parse is an error.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Load config from the default location
    pub fn load() -> crate::Result<Self> {
        Self::load_from(Self::config_path()?)
    }

    /// Load config from an explicit path, falling back to defaults if absent
    pub fn load_from<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save config to the default location
    pub fn save(&self) -> crate::Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the config file path (XDG on Linux, Application Support on macOS,
    /// AppData on Windows)
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?;
        Ok(config_dir.join("ainav").join("config.toml"))
    }
}

/// Where bookmarks are persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    File,
    Memory,
    Disabled,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Database file (sqlite) or slot directory (file). Defaults under the
    /// platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Slot key the bookmark list is written under
    #[serde(default = "default_bookmarks_key")]
    pub bookmarks_key: String,
}

fn default_bookmarks_key() -> String {
    BOOKMARKS_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: None,
            bookmarks_key: default_bookmarks_key(),
        }
    }
}

impl StorageConfig {
    /// Resolve the on-disk location for file-backed backends
    pub fn resolved_path(&self) -> crate::Result<Option<PathBuf>> {
        if let Some(path) = &self.path {
            return Ok(Some(path.clone()));
        }

        let leaf = match self.backend {
            StorageBackend::Sqlite => "ainav.db",
            StorageBackend::File => "slots",
            StorageBackend::Memory | StorageBackend::Disabled => return Ok(None),
        };

        let data_dir = dirs::data_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find data directory".into()))?;
        Ok(Some(data_dir.join("ainav").join(leaf)))
    }

    /// Open the configured backend
    pub fn open_store(&self) -> crate::Result<Box<dyn KeyValueStore>> {
        let path = self.resolved_path()?;

        let store: Box<dyn KeyValueStore> = match (self.backend, path) {
            (StorageBackend::Sqlite, Some(path)) => Box::new(SqliteStore::open(path)?),
            (StorageBackend::File, Some(path)) => Box::new(FileStore::new(path)),
            (StorageBackend::Memory, _) => Box::new(MemoryStore::new()),
            (StorageBackend::Disabled, _) => Box::new(DisabledStore::new()),
            (backend, None) => {
                return Err(crate::Error::ConfigError(format!(
                    "No storage path for backend {:?}",
                    backend
                )))
            }
        };

        Ok(store)
    }

    /// Open the configured backend, or run without persistence if it can't be
    /// opened. Bookmarks then only last for this process.
    pub fn open_store_or_disabled(&self) -> Box<dyn KeyValueStore> {
        match self.open_store() {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!("Bookmark storage unavailable, continuing without it: {}", e);
                Box::new(DisabledStore::with_reason(e.to_string()))
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CatalogConfig {
    /// JSON catalog to browse instead of the bundled one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    /// Order for the bookmarks view: "selection" (when bookmarked) or "catalog"
    #[serde(default)]
    pub bookmark_order: ViewOrder,

    /// Default number of search results
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

fn default_search_limit() -> usize {
    20
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            bookmark_order: ViewOrder::default(),
            search_limit: default_search_limit(),
        }
    }
}
