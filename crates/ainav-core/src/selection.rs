/// Ordered, duplicate-free set of catalog item IDs
///
/// Both the bookmark and the compare store sit on top of this. Insertion
/// order is kept because it is what users see. An optional capacity caps the
/// size; inserts past it are refused without touching existing entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<String>,
    capacity: Option<usize>,
}

impl SelectionSet {
    /// Unbounded, empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty set that never grows past `capacity`
    pub fn bounded(capacity: usize) -> Self {
        Self {
            ids: Vec::new(),
            capacity: Some(capacity),
        }
    }

    /// Build a set from a list that may contain duplicates
    ///
    /// First occurrence wins. For a bounded set anything past capacity is
    /// dropped, same as calling `insert` one by one.
    pub fn from_ids<I, S>(ids: I, capacity: Option<usize>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self {
            ids: Vec::new(),
            capacity,
        };
        for id in ids {
            set.insert(id);
        }
        set
    }

    /// Append `id` if it is new and there is room. Returns whether it was added.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.contains(&id) || self.is_full() {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Drop `id` if present. Returns whether anything changed.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.ids.iter().position(|existing| existing == id) {
            Some(idx) => {
                self.ids.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Empty the set. Returns whether it had anything in it.
    pub fn clear(&mut self) -> bool {
        let changed = !self.ids.is_empty();
        self.ids.clear();
        changed
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// True when a bounded set has no room left. Unbounded sets are never full.
    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|cap| self.ids.len() >= cap)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ids
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.ids.iter()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.ids.clone()
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
