/// Inverted indices over the four selectable attribute families
///
/// Each family (width, weight, style, language) gets its own mapping from
/// an attribute value to the set of records carrying it. Record sets are
/// Roaring bitmaps of store ids, so unions and intersections across
/// thousands of fonts stay cheap.
///
/// The whole structure is derived from a [`FontStore`]: it is built in one
/// pass after loading and never patched afterwards.
use std::collections::HashMap;
use std::fmt;

use roaring::RoaringBitmap;

use crate::record::FontRecord;
use crate::store::{FontStore, RecordId};

/// One selector dimension with its own inverted index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttributeFamily {
    Width,
    Weight,
    Style,
    Language,
}

impl AttributeFamily {
    /// Processing order used by the selector engine.
    pub const ALL: [AttributeFamily; 4] = [
        AttributeFamily::Width,
        AttributeFamily::Weight,
        AttributeFamily::Style,
        AttributeFamily::Language,
    ];

    /// The record's values for this family.
    pub fn values_of(self, record: &FontRecord) -> &[String] {
        match self {
            AttributeFamily::Width => &record.widths,
            AttributeFamily::Weight => &record.weights,
            AttributeFamily::Style => &record.styles,
            AttributeFamily::Language => &record.languages,
        }
    }

    /// Singular key used in query strings (`width=condensed`).
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeFamily::Width => "width",
            AttributeFamily::Weight => "weight",
            AttributeFamily::Style => "style",
            AttributeFamily::Language => "language",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == key)
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AttributeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value -> record ids for a single family. Values are exact,
/// case-sensitive keys.
#[derive(Debug, Default, Clone)]
pub struct InvertedIndex {
    postings: HashMap<String, RoaringBitmap>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_value(&mut self, value: &str, id: RecordId) {
        if let Some(bitmap) = self.postings.get_mut(value) {
            bitmap.insert(id);
        } else {
            let mut bitmap = RoaringBitmap::new();
            bitmap.insert(id);
            self.postings.insert(value.to_string(), bitmap);
        }
    }

    /// Records holding `value`; empty when the value was never indexed.
    pub fn lookup(&self, value: &str) -> RoaringBitmap {
        self.postings.get(value).cloned().unwrap_or_default()
    }

    /// Records holding at least one of `values`.
    pub fn union_of<S: AsRef<str>>(&self, values: &[S]) -> RoaringBitmap {
        let mut union = RoaringBitmap::new();
        for value in values {
            if let Some(bitmap) = self.postings.get(value.as_ref()) {
                union |= bitmap;
            }
        }
        union
    }

    /// Indexed values, sorted.
    pub fn values(&self) -> Vec<&str> {
        let mut values: Vec<&str> = self.postings.keys().map(String::as_str).collect();
        values.sort_unstable();
        values
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

/// The four per-family indices, addressed by [`AttributeFamily`].
#[derive(Debug, Default, Clone)]
pub struct AttributeIndex {
    families: [InvertedIndex; 4],
}

impl AttributeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every value of every record currently in `store`.
    pub fn build(store: &FontStore) -> Self {
        let mut index = Self::new();
        for (id, record) in store.entries() {
            index.add_record(id, record);
        }
        index
    }

    pub fn add_record(&mut self, id: RecordId, record: &FontRecord) {
        for family in AttributeFamily::ALL {
            let inverted = &mut self.families[family.slot()];
            for value in family.values_of(record) {
                inverted.add_value(value, id);
            }
        }
    }

    pub fn family(&self, family: AttributeFamily) -> &InvertedIndex {
        &self.families[family.slot()]
    }

    pub fn lookup(&self, family: AttributeFamily, value: &str) -> RoaringBitmap {
        self.family(family).lookup(value)
    }
}

/// Intersect an optional working set with another set; `None` means
/// nothing has constrained the working set yet.
pub fn intersect_optional(opt: Option<RoaringBitmap>, other: RoaringBitmap) -> RoaringBitmap {
    match opt {
        Some(mut bm) => {
            bm &= &other;
            bm
        }
        None => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(bitmap: &RoaringBitmap) -> Vec<u32> {
        bitmap.iter().collect()
    }

    #[test]
    fn lookup_unknown_value_is_empty() {
        let index = InvertedIndex::new();
        assert!(index.lookup("bold").is_empty());
    }

    #[test]
    fn add_value_creates_and_extends_sets() {
        let mut index = InvertedIndex::new();
        index.add_value("bold", 3);
        index.add_value("bold", 1);
        index.add_value("thin", 2);

        assert_eq!(ids(&index.lookup("bold")), vec![1, 3]);
        assert_eq!(ids(&index.lookup("thin")), vec![2]);
        assert_eq!(index.values(), vec!["bold", "thin"]);
    }

    #[test]
    fn values_are_case_sensitive() {
        let mut index = InvertedIndex::new();
        index.add_value("Bold", 0);
        assert!(index.lookup("bold").is_empty());
    }

    #[test]
    fn union_skips_unknown_values() {
        let mut index = InvertedIndex::new();
        index.add_value("a", 0);
        index.add_value("b", 1);

        assert_eq!(ids(&index.union_of(&["a", "b", "zzz"])), vec![0, 1]);
        assert!(index.union_of(&["zzz"]).is_empty());
    }

    #[test]
    fn build_indexes_each_family_separately() {
        let mut store = FontStore::new();
        store
            .put(
                FontRecord::new("A")
                    .with_widths(["condensed"])
                    .with_weights(["bold"])
                    .with_styles(["italic"])
                    .with_languages(["latin"]),
            )
            .unwrap();
        store
            .put(FontRecord::new("B").with_widths(["condensed"]))
            .unwrap();

        let index = AttributeIndex::build(&store);

        assert_eq!(ids(&index.lookup(AttributeFamily::Width, "condensed")), vec![0, 1]);
        assert_eq!(ids(&index.lookup(AttributeFamily::Weight, "bold")), vec![0]);
        assert!(index.lookup(AttributeFamily::Weight, "condensed").is_empty());
        assert_eq!(index.family(AttributeFamily::Language).len(), 1);
    }

    #[test]
    fn family_keys_round_trip() {
        for family in AttributeFamily::ALL {
            assert_eq!(AttributeFamily::from_key(family.as_str()), Some(family));
        }
        assert_eq!(AttributeFamily::from_key("widths"), None);
    }

    #[test]
    fn intersect_optional_seeds_then_narrows() {
        let a: RoaringBitmap = [1, 2, 3].into_iter().collect();
        let b: RoaringBitmap = [2, 3, 4].into_iter().collect();

        let seeded = intersect_optional(None, a);
        let narrowed = intersect_optional(Some(seeded), b);
        assert_eq!(ids(&narrowed), vec![2, 3]);
    }
}
