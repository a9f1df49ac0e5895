//! Flattened "what items matter" view over active gearsets.

use serde::Serialize;
use std::collections::HashMap;

use super::ids::{GearpieceId, GearsetId};
use super::slot::RequirementSlot;
use crate::catalog::ItemId;

/// Category of a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKind {
    /// A gearpiece's target item.
    Gearpiece,
    /// A link of a prerequisite chain.
    Prerequisite,
    /// A materia socket.
    Materia,
}

impl RequirementKind {
    /// Kind of the requirement occupying `slot`.
    pub fn of(slot: RequirementSlot) -> Self {
        match slot {
            RequirementSlot::Target => Self::Gearpiece,
            RequirementSlot::Prerequisite(_) => Self::Prerequisite,
            RequirementSlot::Materia(_) => Self::Materia,
        }
    }
}

/// One place in the model that requires an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RequirementOwner {
    pub gearset: GearsetId,
    pub gearpiece: GearpieceId,
    pub slot: RequirementSlot,
}

impl RequirementOwner {
    /// Kind of this requirement.
    pub fn kind(&self) -> RequirementKind {
        RequirementKind::of(self.slot)
    }
}

/// Everything the model says about one item id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRequirement {
    pub item_id: ItemId,
    /// Owners in priority order.
    pub owners: Vec<RequirementOwner>,
}

impl ItemRequirement {
    /// Units demanded across all owners.
    pub fn demand(&self) -> usize {
        self.owners.len()
    }

    /// Whether any owner is of the given kind.
    pub fn has_kind(&self, kind: RequirementKind) -> bool {
        self.owners.iter().any(|o| o.kind() == kind)
    }

    /// Distinct gearsets requiring the item, in priority order.
    pub fn gearsets(&self) -> Vec<GearsetId> {
        let mut seen = Vec::new();
        for owner in &self.owners {
            if !seen.contains(&owner.gearset) {
                seen.push(owner.gearset);
            }
        }
        seen
    }
}

/// Ordered, de-duplicated map `item id -> requirement descriptor`.
///
/// Iteration follows the first appearance of each item in resolution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllItemRequirements {
    order: Vec<ItemId>,
    entries: HashMap<ItemId, ItemRequirement>,
}

impl AllItemRequirements {
    /// Create an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one owner of `item_id`.
    pub(crate) fn push(&mut self, item_id: ItemId, owner: RequirementOwner) {
        self.entries
            .entry(item_id)
            .or_insert_with(|| {
                self.order.push(item_id);
                ItemRequirement {
                    item_id,
                    owners: Vec::new(),
                }
            })
            .owners
            .push(owner);
    }

    /// Descriptor for an item.
    pub fn get(&self, item_id: ItemId) -> Option<&ItemRequirement> {
        self.entries.get(&item_id)
    }

    /// Whether the item is required anywhere.
    pub fn contains(&self, item_id: ItemId) -> bool {
        self.entries.contains_key(&item_id)
    }

    /// Item ids in order.
    pub fn keys(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.order.iter().copied()
    }

    /// Descriptors in order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemRequirement> + '_ {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no items are required.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
