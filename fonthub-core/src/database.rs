//! The constructed-once font database handed to every caller

use std::path::Path;

use anyhow::Result;

use crate::index::{AttributeFamily, AttributeIndex};
use crate::loader::{load_store, LoadOptions, LoadReport};
use crate::query::Selector;
use crate::record::FontRecord;
use crate::search::{match_selector, sort_records};
use crate::store::FontStore;

/// Record store plus the attribute index derived from it.
///
/// Immutable after construction and `Send + Sync`, so one instance can be
/// shared behind an `Arc` by any number of concurrent readers.
#[derive(Debug, Default, Clone)]
pub struct FontDatabase {
    store: FontStore,
    index: AttributeIndex,
}

impl FontDatabase {
    /// Load every metadata document under `root` and index the result.
    pub fn load(root: &Path, opts: &LoadOptions) -> Result<(Self, LoadReport)> {
        let (store, report) = load_store(root, opts)?;
        Ok((Self::from_store(store), report))
    }

    /// Index an already populated store.
    pub fn from_store(store: FontStore) -> Self {
        let index = AttributeIndex::build(&store);
        Self { store, index }
    }

    /// Build from in-memory records; later duplicates replace earlier ones.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = FontRecord>,
    {
        let mut store = FontStore::new();
        for record in records {
            store.put(record)?;
        }
        Ok(Self::from_store(store))
    }

    /// Every record, sorted by name.
    pub fn all(&self) -> Vec<FontRecord> {
        let mut records: Vec<FontRecord> = self.store.all().cloned().collect();
        sort_records(&mut records);
        records
    }

    /// Records matching `selector`, sorted by name.
    pub fn by_selector(&self, selector: &Selector) -> Vec<FontRecord> {
        match_selector(selector, &self.store, &self.index)
    }

    pub fn get(&self, name: &str) -> Option<&FontRecord> {
        self.store.get(name)
    }

    /// Records listing `category`, sorted by name.
    pub fn by_category(&self, category: &str) -> Vec<FontRecord> {
        let mut records: Vec<FontRecord> = self.store.by_category(category).cloned().collect();
        sort_records(&mut records);
        records
    }

    /// Names indexed under `value` for `family`, sorted.
    pub fn names_with(&self, family: AttributeFamily, value: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .index
            .lookup(family, value)
            .iter()
            .filter_map(|id| self.store.by_id(id))
            .map(|r| r.name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn store(&self) -> &FontStore {
        &self.store
    }

    pub fn index(&self) -> &AttributeIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn database_is_shareable() {
        assert_send_sync::<FontDatabase>();
    }

    #[test]
    fn from_records_indexes_final_documents_only() {
        let db = FontDatabase::from_records([
            FontRecord::new("X").with_weights(["bold"]),
            FontRecord::new("X").with_weights(["light"]),
        ])
        .expect("build");

        assert_eq!(db.len(), 1);
        assert_eq!(db.get("X").unwrap().weights, vec!["light"]);
        assert_eq!(db.names_with(AttributeFamily::Weight, "light"), vec!["X"]);
        assert!(db.names_with(AttributeFamily::Weight, "bold").is_empty());
    }

    #[test]
    fn by_category_is_sorted() {
        let db = FontDatabase::from_records([
            FontRecord::new("Zed").with_categories(["serif"]),
            FontRecord::new("Abel").with_categories(["serif"]),
            FontRecord::new("Mono").with_categories(["monospace"]),
        ])
        .expect("build");

        let names: Vec<String> = db.by_category("serif").into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Abel", "Zed"]);
    }
}
