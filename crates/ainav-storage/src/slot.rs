use crate::{Result, StorageError};
use std::collections::HashMap;

/// A durable string slot keyed by a namespaced name
///
/// Backends store raw strings. Encoding the value (JSON for bookmarks) is the
/// caller's job, so swapping SQLite for a flat file or memory never touches
/// the stores built on top.
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` if nothing was ever written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Drop `key` entirely. Removing a missing key is fine.
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Process-local slots, gone when the process exits
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot without going through the trait, handy for tests
    pub fn with_slot(mut self, key: &str, value: &str) -> Self {
        self.slots.insert(key.to_string(), value.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.slots.remove(key);
        Ok(())
    }
}

/// A backend that refuses every operation
///
/// Stands in for a host that has persistence switched off (private browsing,
/// read-only home directory, `storage.backend = "disabled"`).
#[derive(Debug, Clone, Default)]
pub struct DisabledStore {
    reason: Option<String>,
}

impl DisabledStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }

    fn error(&self) -> StorageError {
        StorageError::Unavailable(
            self.reason
                .clone()
                .unwrap_or_else(|| "persistence is disabled".to_string()),
        )
    }
}

impl KeyValueStore for DisabledStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(self.error())
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        Err(self.error())
    }

    fn remove(&mut self, _key: &str) -> Result<()> {
        Err(self.error())
    }
}

/// Slot keys end up in file names and SQL rows, so keep them boring
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && !key.starts_with('.');

    if ok {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("ainav_bookmarks").unwrap(), None);

        store.set("ainav_bookmarks", "[\"claude\"]").unwrap();
        assert_eq!(
            store.get("ainav_bookmarks").unwrap().as_deref(),
            Some("[\"claude\"]")
        );

        store.set("ainav_bookmarks", "[]").unwrap();
        assert_eq!(store.get("ainav_bookmarks").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.len(), 1);

        store.remove("ainav_bookmarks").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_disabled_store_refuses_everything() {
        let mut store = DisabledStore::with_reason("quota exceeded");

        let err = store.get("k").unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(ref r) if r == "quota exceeded"));
        assert!(store.set("k", "v").is_err());
        assert!(store.remove("k").is_err());
    }

    #[test]
    fn test_boxed_store_delegates() {
        let mut store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("ainav_bookmarks").is_ok());
        assert!(validate_key("compare-v2.json").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key(".hidden").is_err());
        assert!(validate_key("with space").is_err());
    }
}
