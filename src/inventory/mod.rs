//! Owned item quantities.
//!
//! The solver only ever asks one question of the inventory: how many of an
//! item are owned right now. [`InventorySource`] is that seam. The
//! file-backed [`InventorySnapshot`] folds per-container quantities into one
//! map according to the inventory settings.

pub mod snapshot;

pub use snapshot::{Container, ContainerKind, InventoryFile, InventorySnapshot, ItemStack};

use std::collections::{BTreeMap, HashMap};

use crate::catalog::ItemId;

/// Supplies owned quantities per item id.
///
/// Implementations must answer without blocking; the solver calls this once
/// per distinct item during a pass.
pub trait InventorySource: Send + Sync {
    /// Units of `item` currently owned. HQ and NQ ids are distinct items.
    fn owned_quantity(&self, item: ItemId) -> u32;
}

impl InventorySource for HashMap<ItemId, u32> {
    fn owned_quantity(&self, item: ItemId) -> u32 {
        self.get(&item).copied().unwrap_or(0)
    }
}

impl InventorySource for BTreeMap<ItemId, u32> {
    fn owned_quantity(&self, item: ItemId) -> u32 {
        self.get(&item).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_sources_default_to_zero() {
        let mut owned = HashMap::new();
        owned.insert(ItemId::new(10), 2);
        assert_eq!(owned.owned_quantity(ItemId::new(10)), 2);
        assert_eq!(owned.owned_quantity(ItemId::new(11)), 0);
    }

    #[test]
    fn hq_and_nq_are_distinct() {
        let owned: BTreeMap<ItemId, u32> = [(ItemId::new(10), 1)].into_iter().collect();
        assert_eq!(owned.owned_quantity(ItemId::new(10).to_hq()), 0);
    }
}
