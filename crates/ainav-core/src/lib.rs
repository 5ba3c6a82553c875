// Selection state for the AI tool directory: bookmarks, comparison, and the
// catalog they point into
pub mod bookmarks;
pub mod catalog;
pub mod compare;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod search;
pub mod selection;
pub mod session;
pub mod views;

pub use bookmarks::{BookmarkStore, BOOKMARKS_KEY};
pub use catalog::{Catalog, CatalogProvider};
pub use compare::{CompareStore, MAX_COMPARE_ITEMS};
pub use config::Config;
pub use error::Error;
pub use export::{ExportFormat, Exporter};
pub use models::{CatalogItem, Pricing};
pub use selection::SelectionSet;
pub use session::{BookmarkHandle, CompareHandle, Session};
pub use views::{ComparisonTable, ViewOrder};

/// Result type alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;
