//! Per-item claim accounting.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::catalog::ItemId;
use crate::inventory::InventorySource;
use crate::model::{GearpieceId, RequirementSlot};

/// Address of one requirement inside the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RequirementKey {
    pub gearpiece: GearpieceId,
    pub slot: RequirementSlot,
}

impl RequirementKey {
    pub fn new(gearpiece: GearpieceId, slot: RequirementSlot) -> Self {
        Self { gearpiece, slot }
    }
}

/// How many units of each item have been claimed, and how many were owned
/// when the pass started.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssignmentLedger {
    owned: BTreeMap<ItemId, u32>,
    claimed: BTreeMap<ItemId, u32>,
}

impl AssignmentLedger {
    /// Empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim one unit of `item` if one is left. Owned quantities are read from
    /// the inventory once per item and cached for the rest of the pass.
    pub fn try_claim(&mut self, item: ItemId, inventory: &dyn InventorySource) -> bool {
        let owned = *self
            .owned
            .entry(item)
            .or_insert_with(|| inventory.owned_quantity(item));
        let claimed = self.claimed.entry(item).or_insert(0);
        if *claimed < owned {
            *claimed += 1;
            true
        } else {
            false
        }
    }

    /// Units of `item` claimed.
    pub fn claimed(&self, item: ItemId) -> u32 {
        self.claimed.get(&item).copied().unwrap_or(0)
    }

    /// Units of `item` owned at resolution time, if the pass looked at it.
    pub fn owned(&self, item: ItemId) -> Option<u32> {
        self.owned.get(&item).copied()
    }

    /// Owned units not claimed by anything.
    pub fn unclaimed(&self, item: ItemId) -> u32 {
        self.owned(item).unwrap_or(0).saturating_sub(self.claimed(item))
    }

    /// Items with at least one claim, in id order.
    pub fn claims(&self) -> impl Iterator<Item = (ItemId, u32)> + '_ {
        self.claimed
            .iter()
            .filter(|(_, n)| **n > 0)
            .map(|(id, n)| (*id, *n))
    }

    /// Total units claimed.
    pub fn total_claimed(&self) -> u64 {
        self.claimed.values().map(|n| u64::from(*n)).sum()
    }
}
