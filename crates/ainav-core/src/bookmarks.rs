use crate::selection::SelectionSet;
use ainav_storage::KeyValueStore;

/// Slot key bookmarks are persisted under unless configured otherwise
pub const BOOKMARKS_KEY: &str = "ainav_bookmarks";

/// Bookmarked catalog items for one user, kept durable across restarts
///
/// Every change is written straight back to the slot as a JSON array of IDs.
/// Storage is best effort: a broken or missing backend degrades to an
/// in-memory set and the failure is only logged.
pub struct BookmarkStore {
    set: SelectionSet,
    storage: Box<dyn KeyValueStore>,
    key: String,
    mounted: bool,
}

impl BookmarkStore {
    /// Create an empty store that has not read its slot yet
    ///
    /// Most callers want [`BookmarkStore::open`]. This exists so the
    /// "not loaded yet" window can be observed and tested.
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        Self::with_key(storage, BOOKMARKS_KEY)
    }

    pub fn with_key(storage: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            set: SelectionSet::new(),
            storage,
            key: key.into(),
            mounted: false,
        }
    }

    /// Create the store and immediately hydrate it from storage
    pub fn open(storage: Box<dyn KeyValueStore>) -> Self {
        let mut store = Self::new(storage);
        store.load();
        store
    }

    /// Read the persisted bookmarks into memory and mark the store mounted
    ///
    /// Missing, unreadable or corrupt slots all resolve to an empty set.
    /// Anything added before the load is kept and appended after the
    /// persisted entries.
    pub fn load(&mut self) {
        let persisted = self.read_slot();
        let pending = std::mem::take(&mut self.set);

        self.set = SelectionSet::from_ids(persisted, None);
        let mut merged = false;
        for id in pending.iter() {
            merged |= self.set.insert(id.as_str());
        }

        self.mounted = true;
        tracing::debug!(
            "Loaded {} bookmarks from slot {}",
            self.set.len(),
            self.key
        );

        if merged {
            self.persist();
        }
    }

    /// False until the persisted state has been resolved
    ///
    /// An empty, unmounted store means "don't know yet", not "no bookmarks".
    pub fn mounted(&self) -> bool {
        self.mounted
    }

    /// Adding an ID that is already bookmarked changes nothing and writes
    /// nothing.
    pub fn add_bookmark(&mut self, id: &str) {
        if self.set.insert(id) {
            tracing::debug!("Bookmarked {}", id);
            self.persist();
        }
    }

    /// Always writes the slot, even when `id` wasn't bookmarked, so the slot
    /// ends up matching this store whatever another process wrote last.
    pub fn remove_bookmark(&mut self, id: &str) {
        if self.set.remove(id) {
            tracing::debug!("Removed bookmark {}", id);
        }
        self.persist();
    }

    /// Always writes an empty list, even if nothing was bookmarked here.
    pub fn clear_bookmarks(&mut self) {
        if self.set.clear() {
            tracing::debug!("Cleared bookmarks");
        }
        self.persist();
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.set.contains(id)
    }

    /// Bookmarked IDs in the order they were added
    pub fn bookmarked_ids(&self) -> &[String] {
        self.set.as_slice()
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Hand the backend back, e.g. to reopen it as if the process restarted
    pub fn into_storage(self) -> Box<dyn KeyValueStore> {
        self.storage
    }

    fn read_slot(&self) -> Vec<String> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Could not read bookmarks, starting empty: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!("Ignoring corrupt bookmarks in slot {}: {}", self.key, e);
                Vec::new()
            }
        }
    }

    fn persist(&mut self) {
        // Writing before the slot was read would clobber it with a partial set
        if !self.mounted {
            return;
        }

        let value = match serde_json::to_string(self.set.as_slice()) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Could not serialize bookmarks: {}", e);
                return;
            }
        };

        if let Err(e) = self.storage.set(&self.key, &value) {
            tracing::warn!("Bookmarks not persisted, keeping them in memory: {}", e);
        }
    }
}

impl std::fmt::Debug for BookmarkStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookmarkStore")
            .field("ids", &self.set.as_slice())
            .field("key", &self.key)
            .field("mounted", &self.mounted)
            .finish()
    }
}
