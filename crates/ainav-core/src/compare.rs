use crate::selection::SelectionSet;

/// How many tools can sit side by side in a comparison
pub const MAX_COMPARE_ITEMS: usize = 4;

/// Items staged for side-by-side comparison
///
/// Lives only as long as the session. Once four items are staged further
/// adds are ignored without any signal; callers that want to tell the user
/// check [`CompareStore::is_full`] first or [`CompareStore::is_selected`]
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareStore {
    set: SelectionSet,
}

impl CompareStore {
    pub fn new() -> Self {
        Self {
            set: SelectionSet::bounded(MAX_COMPARE_ITEMS),
        }
    }

    pub fn add_to_compare(&mut self, id: &str) {
        if self.set.insert(id) {
            tracing::debug!("Staged {} for comparison", id);
        } else if self.set.is_full() && !self.set.contains(id) {
            tracing::debug!("Comparison full, ignoring {}", id);
        }
    }

    pub fn remove_from_compare(&mut self, id: &str) {
        if self.set.remove(id) {
            tracing::debug!("Unstaged {} from comparison", id);
        }
    }

    pub fn clear_compare(&mut self) {
        self.set.clear();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.set.contains(id)
    }

    pub fn selected_ids(&self) -> &[String] {
        self.set.as_slice()
    }

    pub fn is_full(&self) -> bool {
        self.set.is_full()
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

impl Default for CompareStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifth_item_is_ignored() {
        let mut store = CompareStore::new();
        for id in ["a", "b", "c", "d"] {
            store.add_to_compare(id);
        }
        assert!(store.is_full());

        store.add_to_compare("e");

        assert_eq!(store.len(), MAX_COMPARE_ITEMS);
        assert_eq!(store.selected_ids(), ["a", "b", "c", "d"]);
        assert!(!store.is_selected("e"));
    }

    #[test]
    fn test_duplicate_add_keeps_order() {
        let mut store = CompareStore::new();
        store.add_to_compare("a");
        store.add_to_compare("b");
        store.add_to_compare("a");

        assert_eq!(store.selected_ids(), ["a", "b"]);
    }

    #[test]
    fn test_remove_frees_a_slot() {
        let mut store = CompareStore::new();
        for id in ["a", "b", "c", "d"] {
            store.add_to_compare(id);
        }

        store.remove_from_compare("zzz");
        assert_eq!(store.len(), 4);

        store.remove_from_compare("b");
        store.add_to_compare("e");
        assert_eq!(store.selected_ids(), ["a", "c", "d", "e"]);
    }

    #[test]
    fn test_clear_and_queries() {
        let mut store = CompareStore::default();
        store.add_to_compare("a");

        assert!(store.is_selected("a"));
        assert!(store.is_selected("a"));

        store.clear_compare();
        store.clear_compare();
        assert!(store.is_empty());
        assert!(!store.is_selected("a"));
    }
}
