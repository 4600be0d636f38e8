//! In-memory content index.
//!
//! Provides [`MemoryIndex`], a `HashMap`-backed [`ContentIndex`] used by the
//! CLI (populated from a directory walk before rendering) and by tests.

use std::collections::HashMap;

use crate::index::{ContentIndex, ContentUnit};

/// In-memory content index.
///
/// Use the builder methods to populate it with units before handing it to
/// the renderer.
///
/// # Example
///
/// ```
/// use weft_index::{ContentIndex, ContentUnit, MemoryIndex};
///
/// let index = MemoryIndex::new()
///     .with_unit(ContentUnit::new("a", "A", "Content of A"))
///     .with_unit(ContentUnit::new("b", "B", "Content of B"));
///
/// assert_eq!(index.len(), 2);
/// assert_eq!(index.get("a").unwrap().title, "A");
/// ```
#[derive(Debug, Default)]
pub struct MemoryIndex {
    units: HashMap<String, ContentUnit>,
}

impl MemoryIndex {
    /// Create a new empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a content unit, replacing any previous unit with the same id.
    #[must_use]
    pub fn with_unit(mut self, unit: ContentUnit) -> Self {
        self.insert(unit);
        self
    }

    /// Insert a content unit, replacing any previous unit with the same id.
    pub fn insert(&mut self, unit: ContentUnit) {
        self.units.insert(unit.id.clone(), unit);
    }

    /// Number of units in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// True if the index holds no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// All unit ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.units.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl ContentIndex for MemoryIndex {
    fn get(&self, id: &str) -> Option<ContentUnit> {
        self.units.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_memory_index_is_send_sync() {
        assert_send_sync::<MemoryIndex>();
    }

    #[test]
    fn test_new_empty() {
        let index = MemoryIndex::new();

        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(index.get("anything").is_none());
    }

    #[test]
    fn test_with_unit() {
        let index = MemoryIndex::new()
            .with_unit(ContentUnit::new("guide", "Guide", "Guide content"))
            .with_unit(ContentUnit::new("api", "API", "API content"));

        assert_eq!(index.len(), 2);
        assert_eq!(index.get("guide").unwrap().title, "Guide");
        assert_eq!(index.get("api").unwrap().raw_body, "API content");
    }

    #[test]
    fn test_insert_replaces() {
        let mut index = MemoryIndex::new();
        index.insert(ContentUnit::new("guide", "Old", "old"));
        index.insert(ContentUnit::new("guide", "New", "new"));

        assert_eq!(index.len(), 1);
        assert_eq!(index.get("guide").unwrap().title, "New");
    }

    #[test]
    fn test_get_missing() {
        let index = MemoryIndex::new().with_unit(ContentUnit::new("a", "A", "a"));

        assert!(index.get("b").is_none());
    }

    #[test]
    fn test_ids_sorted() {
        let index = MemoryIndex::new()
            .with_unit(ContentUnit::new("zebra", "Z", "z"))
            .with_unit(ContentUnit::new("alpha", "A", "a"))
            .with_unit(ContentUnit::new("mid", "M", "m"));

        assert_eq!(index.ids(), vec!["alpha", "mid", "zebra"]);
    }
}
