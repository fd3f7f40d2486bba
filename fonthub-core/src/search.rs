//! Selector matching over the attribute index (OR within a family, AND across)

use roaring::RoaringBitmap;

use crate::index::{intersect_optional, AttributeFamily, AttributeIndex};
use crate::query::Selector;
use crate::record::FontRecord;
use crate::store::FontStore;

/// Ids of records satisfying `selector`.
///
/// Families are visited in [`AttributeFamily::ALL`] order; the first
/// constrained family seeds the working set and later ones intersect it.
/// Since intersection commutes, the order only decides which set seeds.
pub fn matching_ids(
    selector: &Selector,
    store: &FontStore,
    index: &AttributeIndex,
) -> RoaringBitmap {
    let mut matched: Option<RoaringBitmap> = None;

    for family in AttributeFamily::ALL {
        let wanted = selector.values(family);
        if wanted.is_empty() {
            continue;
        }

        let union = index.family(family).union_of(wanted);
        let narrowed = intersect_optional(matched, union);
        let exhausted = narrowed.is_empty();
        matched = Some(narrowed);
        if exhausted {
            break;
        }
    }

    matched.unwrap_or_else(|| store.all_ids())
}

/// Resolve the records matching `selector`, sorted by name.
///
/// Ids with no record behind them are skipped.
pub fn match_selector(
    selector: &Selector,
    store: &FontStore,
    index: &AttributeIndex,
) -> Vec<FontRecord> {
    let ids = matching_ids(selector, store, index);
    let mut records: Vec<FontRecord> = ids
        .iter()
        .filter_map(|id| store.by_id(id))
        .cloned()
        .collect();

    sort_records(&mut records);
    records
}

/// Deterministic output order for callers that print or serve results.
pub fn sort_records(records: &mut [FontRecord]) {
    records.sort_by(|a, b| a.name.cmp(&b.name));
}
