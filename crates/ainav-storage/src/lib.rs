// Durable key-value slots for client-held state
// Bookmarks land here; anything else that needs to survive a restart can too

pub mod error;
pub mod file;
pub mod slot;
pub mod sqlite;

pub use error::{Result, StorageError};
pub use file::FileStore;
pub use slot::{DisabledStore, KeyValueStore, MemoryStore};
pub use sqlite::SqliteStore;
