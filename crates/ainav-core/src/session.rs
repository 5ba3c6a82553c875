use crate::bookmarks::BookmarkStore;
use crate::compare::CompareStore;
use crate::{Error, Result};
use ainav_storage::KeyValueStore;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// One user's selection state for the lifetime of a run
///
/// Build it once at the top and pass it (or handles taken from it) to
/// whatever needs bookmarks or the comparison tray. Handles only hold weak
/// references: once the session is gone every call on them returns
/// [`Error::OutsideSession`] instead of quietly acting on nothing.
pub struct Session {
    bookmarks: Rc<RefCell<BookmarkStore>>,
    compare: Rc<RefCell<CompareStore>>,
}

impl Session {
    /// Start a session, hydrating bookmarks from `storage`
    pub fn start(storage: Box<dyn KeyValueStore>) -> Self {
        Self::from_stores(BookmarkStore::open(storage), CompareStore::new())
    }

    /// Start a session whose bookmarks live under a non-default slot key
    pub fn start_with_key(storage: Box<dyn KeyValueStore>, key: &str) -> Self {
        let mut bookmarks = BookmarkStore::with_key(storage, key);
        bookmarks.load();
        Self::from_stores(bookmarks, CompareStore::new())
    }

    pub fn from_stores(bookmarks: BookmarkStore, compare: CompareStore) -> Self {
        tracing::info!(
            "Session started with {} bookmarks",
            bookmarks.len()
        );
        Self {
            bookmarks: Rc::new(RefCell::new(bookmarks)),
            compare: Rc::new(RefCell::new(compare)),
        }
    }

    pub fn bookmarks(&self) -> BookmarkHandle {
        BookmarkHandle {
            store: Rc::downgrade(&self.bookmarks),
        }
    }

    pub fn compare(&self) -> CompareHandle {
        CompareHandle {
            store: Rc::downgrade(&self.compare),
        }
    }

    /// End the session, handing back the bookmark store
    ///
    /// Every handle taken from this session is dead afterwards.
    pub fn end(self) -> Option<BookmarkStore> {
        tracing::info!("Session ended");
        Rc::try_unwrap(self.bookmarks)
            .ok()
            .map(RefCell::into_inner)
    }
}

/// Borrowed access to a session's bookmarks
#[derive(Debug, Clone, Default)]
pub struct BookmarkHandle {
    store: Weak<RefCell<BookmarkStore>>,
}

impl BookmarkHandle {
    /// A handle that was never bound to a session
    pub fn detached() -> Self {
        Self::default()
    }

    fn with<T>(&self, f: impl FnOnce(&mut BookmarkStore) -> T) -> Result<T> {
        let store = self
            .store
            .upgrade()
            .ok_or(Error::OutsideSession("bookmark"))?;
        let mut store = store.borrow_mut();
        Ok(f(&mut store))
    }

    pub fn add_bookmark(&self, id: &str) -> Result<()> {
        self.with(|s| s.add_bookmark(id))
    }

    pub fn remove_bookmark(&self, id: &str) -> Result<()> {
        self.with(|s| s.remove_bookmark(id))
    }

    pub fn clear_bookmarks(&self) -> Result<()> {
        self.with(|s| s.clear_bookmarks())
    }

    pub fn is_bookmarked(&self, id: &str) -> Result<bool> {
        self.with(|s| s.is_bookmarked(id))
    }

    /// Snapshot of the bookmarked IDs in insertion order
    pub fn bookmarked_ids(&self) -> Result<Vec<String>> {
        self.with(|s| s.bookmarked_ids().to_vec())
    }

    pub fn mounted(&self) -> Result<bool> {
        self.with(|s| s.mounted())
    }

    pub fn len(&self) -> Result<usize> {
        self.with(|s| s.len())
    }
}

/// Borrowed access to a session's comparison tray
#[derive(Debug, Clone, Default)]
pub struct CompareHandle {
    store: Weak<RefCell<CompareStore>>,
}

impl CompareHandle {
    /// A handle that was never bound to a session
    pub fn detached() -> Self {
        Self::default()
    }

    fn with<T>(&self, f: impl FnOnce(&mut CompareStore) -> T) -> Result<T> {
        let store = self
            .store
            .upgrade()
            .ok_or(Error::OutsideSession("compare"))?;
        let mut store = store.borrow_mut();
        Ok(f(&mut store))
    }

    pub fn add_to_compare(&self, id: &str) -> Result<()> {
        self.with(|s| s.add_to_compare(id))
    }

    pub fn remove_from_compare(&self, id: &str) -> Result<()> {
        self.with(|s| s.remove_from_compare(id))
    }

    pub fn clear_compare(&self) -> Result<()> {
        self.with(|s| s.clear_compare())
    }

    pub fn is_selected(&self, id: &str) -> Result<bool> {
        self.with(|s| s.is_selected(id))
    }

    /// Snapshot of the staged IDs in the order they were added
    pub fn selected_ids(&self) -> Result<Vec<String>> {
        self.with(|s| s.selected_ids().to_vec())
    }

    pub fn is_full(&self) -> Result<bool> {
        self.with(|s| s.is_full())
    }
}
