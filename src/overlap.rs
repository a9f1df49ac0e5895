//! Overlap detection between counted gearsets.
//!
//! When two gearsets target the same item, aggregate counts over both may
//! overstate what the user has to farm. The detector reports the minimal
//! groups of gearsets sharing items so the caller can warn about it.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::ItemId;
use crate::model::{CountSelection, GearsetId, GearsetStore};

/// Gearsets that target at least one common item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlapGroup {
    /// Members in priority order.
    pub gearsets: Vec<GearsetId>,
    /// Items whose set of targeting gearsets is exactly this group.
    pub items: Vec<ItemId>,
}

/// Find minimal overlapping groups among the selected gearsets.
///
/// Each gearset counts once per item id. A candidate group is dropped when
/// another candidate strictly contains it or an equal group was already
/// reported. Groups come out in order of first appearance of their item.
pub fn detect_overlaps(store: &GearsetStore, selection: &CountSelection) -> Vec<OverlapGroup> {
    let ordered: Vec<_> = store
        .ordered()
        .into_iter()
        .filter(|g| selection.contains(g.id()))
        .collect();
    let rank: BTreeMap<GearsetId, usize> = ordered
        .iter()
        .enumerate()
        .map(|(i, g)| (g.id(), i))
        .collect();

    let mut item_order = Vec::new();
    let mut holders: BTreeMap<ItemId, BTreeSet<GearsetId>> = BTreeMap::new();
    for gearset in &ordered {
        for piece in &gearset.gearpieces {
            let set = holders.entry(piece.item_id).or_insert_with(|| {
                item_order.push(piece.item_id);
                BTreeSet::new()
            });
            set.insert(gearset.id());
        }
    }

    let candidates: Vec<(ItemId, &BTreeSet<GearsetId>)> = item_order
        .iter()
        .filter_map(|item| holders.get(item).map(|set| (*item, set)))
        .filter(|(_, set)| set.len() > 1)
        .collect();

    let mut groups: Vec<(BTreeSet<GearsetId>, OverlapGroup)> = Vec::new();
    for (item, set) in &candidates {
        if let Some((_, group)) = groups.iter_mut().find(|(g, _)| g == *set) {
            group.items.push(*item);
            continue;
        }
        let dominated = candidates
            .iter()
            .any(|(_, other)| other.len() > set.len() && other.is_superset(set));
        if dominated {
            continue;
        }
        let mut members: Vec<GearsetId> = set.iter().copied().collect();
        members.sort_by_key(|id| rank.get(id).copied().unwrap_or(usize::MAX));
        groups.push((
            (*set).clone(),
            OverlapGroup {
                gearsets: members,
                items: vec![*item],
            },
        ));
    }

    tracing::debug!("Overlap detection found {} groups", groups.len());
    groups.into_iter().map(|(_, group)| group).collect()
}
