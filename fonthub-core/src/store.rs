//! Record store: the source of truth for every loaded font record

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use roaring::RoaringBitmap;

use crate::record::FontRecord;

/// Dense identifier handed out per distinct record name; the inverted
/// indices store these rather than names.
pub type RecordId = u32;

/// Name-keyed record storage with stable dense ids.
///
/// Overwriting a name keeps its id, so an id never points at a record with
/// a different name.
#[derive(Debug, Default, Clone)]
pub struct FontStore {
    records: Vec<FontRecord>,
    ids: HashMap<String, RecordId>,
}

impl FontStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `record` under its name, returning the record it replaced.
    pub fn put(&mut self, record: FontRecord) -> Result<Option<FontRecord>> {
        if let Some(&id) = self.ids.get(&record.name) {
            let slot = &mut self.records[id as usize];
            return Ok(Some(std::mem::replace(slot, record)));
        }

        let id = RecordId::try_from(self.records.len())
            .map_err(|_| anyhow!("record store is full ({} records)", self.records.len()))?;
        self.ids.insert(record.name.clone(), id);
        self.records.push(record);
        Ok(None)
    }

    pub fn get(&self, name: &str) -> Option<&FontRecord> {
        self.ids.get(name).and_then(|&id| self.by_id(id))
    }

    pub fn id_of(&self, name: &str) -> Option<RecordId> {
        self.ids.get(name).copied()
    }

    pub fn by_id(&self, id: RecordId) -> Option<&FontRecord> {
        self.records.get(id as usize)
    }

    /// Every stored record, in first-insertion order.
    pub fn all(&self) -> impl Iterator<Item = &FontRecord> {
        self.records.iter()
    }

    /// Every stored record paired with its id.
    pub fn entries(&self) -> impl Iterator<Item = (RecordId, &FontRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(idx, record)| (idx as RecordId, record))
    }

    pub fn all_ids(&self) -> RoaringBitmap {
        (0..self.records.len() as RecordId).collect()
    }

    /// Linear scan over the category lists; categories are not indexed.
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a FontRecord> {
        self.records.iter().filter(move |r| r.in_category(category))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
