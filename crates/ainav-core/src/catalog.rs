use crate::models::CatalogItem;
use crate::{Error, Result};
use std::collections::HashSet;
use std::path::Path;

const BUNDLED_CATALOG: &str = include_str!("../data/catalog.json");

/// Read-only source of catalog items
///
/// The stores never call this; views do, to turn selected IDs back into
/// something worth showing.
pub trait CatalogProvider {
    /// Every item, in catalog order
    fn items(&self) -> &[CatalogItem];

    fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.items().iter().find(|item| item.id == id)
    }

    /// Distinct categories in the order they first appear
    ///
    /// Folds ASCII case only, the same way [`CatalogProvider::by_category`]
    /// matches, so every listed category has at least one item behind it.
    fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.items()
            .iter()
            .map(|item| item.category.as_str())
            .filter(|category| seen.insert(category.to_ascii_lowercase()))
            .collect()
    }

    fn by_category(&self, category: &str) -> Vec<&CatalogItem> {
        self.items()
            .iter()
            .filter(|item| item.in_category(category))
            .collect()
    }

    fn featured(&self) -> Vec<&CatalogItem> {
        self.items().iter().filter(|item| item.is_featured()).collect()
    }
}

/// Catalog held in memory, usually parsed from a JSON array
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Build a catalog, rejecting empty or repeated IDs
    pub fn new(items: Vec<CatalogItem>) -> Result<Self> {
        let mut ids = HashSet::new();
        for item in &items {
            if item.id.trim().is_empty() {
                return Err(Error::CatalogError(format!(
                    "item {:?} has an empty id",
                    item.name
                )));
            }
            if !ids.insert(item.id.as_str()) {
                return Err(Error::CatalogError(format!("duplicate id {:?}", item.id)));
            }
        }

        Ok(Self { items })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let items: Vec<CatalogItem> = serde_json::from_str(json)
            .map_err(|e| Error::CatalogError(format!("Failed to parse catalog: {}", e)))?;
        Self::new(items)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&contents)?;
        tracing::debug!("Loaded {} catalog items from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// The catalog shipped with the binary
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CatalogProvider for Catalog {
    fn items(&self) -> &[CatalogItem] {
        &self.items
    }
}
